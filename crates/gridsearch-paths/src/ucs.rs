use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridsearch_core::Coord;

use crate::notify::Notify;
use crate::path::reconstruct;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Heap entry ordered by `(cost, seq, coord)`, smallest first.
///
/// `seq` is a monotonically increasing insertion counter, so equal-cost
/// entries pop in insertion order and the heap order is total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    cost: i32,
    seq: u64,
    coord: Coord,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest entry first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Uniform-cost search with unit edge weights.
///
/// A node's cost is relaxed to `current + 1` whenever that improves it; a
/// node popped for the first time is finalized and later heap entries for it
/// are skipped. `visited` in notifications counts finalized nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformCost;

impl SearchStrategy for UniformCost {
    fn name(&self) -> &'static str {
        "uniform-cost"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        let start = cx.start();
        cx.grid_mut().link(start, None, 0);

        let mut finalized = vec![false; cx.grid().len()];
        let mut settled = 0usize;
        let mut seq = 0u64;
        let mut open = BinaryHeap::new();
        open.push(Entry {
            cost: 0,
            seq,
            coord: start,
        });

        while let Some(Entry { cost, coord: cur, .. }) = open.pop() {
            cx.poll()?;
            let Some(ci) = cx.grid().index(cur) else {
                continue;
            };
            if finalized[ci] {
                continue;
            }
            finalized[ci] = true;
            settled += 1;

            if cur == cx.target() {
                return Ok(Some(reconstruct(cx.grid(), cur)));
            }

            let nbuf = cx.take_neighbors(cur);
            for &n in nbuf.iter() {
                let Some(ni) = cx.grid().index(n) else {
                    continue;
                };
                if finalized[ni] {
                    continue;
                }
                let tentative = cost + 1;
                if tentative >= cx.grid().cost(n) {
                    continue;
                }
                cx.grid_mut().link(n, Some(cur), tentative);
                seq += 1;
                open.push(Entry {
                    cost: tentative,
                    seq,
                    coord: n,
                });
                cx.frontier(n, open.len(), settled)?;
            }
            cx.restore(nbuf);

            cx.explored(cur, open.len(), settled)?;
            cx.spawn_obstacle();
        }
        Ok(None)
    }
}
