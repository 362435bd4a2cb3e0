use std::collections::VecDeque;

use gridsearch_core::{Coord, UNREACHABLE};

use crate::notify::Notify;
use crate::path::reconstruct;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Breadth-first search.
///
/// FIFO frontier; every step costs 1, so the returned path has the fewest
/// moves. Among equally short paths, the one discovered first in clockwise
/// neighbor order wins. Node `cost` holds the BFS depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        let start = cx.start();
        cx.grid_mut().link(start, None, 0);
        let mut queue = VecDeque::from([start]);
        let mut visited = 1usize;

        while let Some(cur) = queue.pop_front() {
            cx.poll()?;
            if cur == cx.target() {
                return Ok(Some(reconstruct(cx.grid(), cur)));
            }
            let depth = cx.grid().cost(cur);

            let nbuf = cx.take_neighbors(cur);
            for &n in nbuf.iter() {
                if cx.grid().cost(n) != UNREACHABLE {
                    continue;
                }
                cx.grid_mut().link(n, Some(cur), depth + 1);
                queue.push_back(n);
                visited += 1;
                cx.frontier(n, queue.len(), visited)?;
            }
            cx.restore(nbuf);

            cx.explored(cur, queue.len(), visited)?;
            cx.spawn_obstacle();
        }
        Ok(None)
    }
}
