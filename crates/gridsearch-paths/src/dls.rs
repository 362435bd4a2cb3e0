use gridsearch_core::{Coord, UNREACHABLE};

use crate::notify::Notify;
use crate::path::reconstruct;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Result of one bounded descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Limited {
    Found(Vec<Coord>),
    /// Some branch was abandoned at the limit; a deeper run may succeed.
    Cutoff,
    /// Every branch ended before the limit; no deeper run can succeed.
    Exhausted,
}

struct Descent {
    limit: usize,
    visited: usize,
    cutoff: bool,
}

/// Run one depth-limited descent from the start of `cx`.
///
/// The obstacle spawner is consulted once, before the descent begins. The
/// grid's search state must already be reset.
pub(crate) fn depth_limited<N: Notify, S: ObstacleSpawner>(
    cx: &mut Search<'_, N, S>,
    limit: usize,
) -> Result<Limited, Interrupt> {
    cx.spawn_obstacle();
    let start = cx.start();
    cx.grid_mut().link(start, None, 0);

    let mut st = Descent {
        limit,
        visited: 1,
        cutoff: false,
    };
    if descend(cx, &mut st, start, 0)? {
        let target = cx.target();
        return Ok(Limited::Found(reconstruct(cx.grid(), target)));
    }
    Ok(if st.cutoff {
        Limited::Cutoff
    } else {
        Limited::Exhausted
    })
}

// Node cost holds the depth at which the node was last entered. A node is
// re-entered only through a strictly shallower route, which also excludes
// every node on the current branch.
fn descend<N: Notify, S: ObstacleSpawner>(
    cx: &mut Search<'_, N, S>,
    st: &mut Descent,
    node: Coord,
    depth: usize,
) -> Result<bool, Interrupt> {
    cx.poll()?;
    if node == cx.target() {
        return Ok(true);
    }
    if depth >= st.limit {
        st.cutoff = true;
        return Ok(false);
    }
    cx.explored(node, depth + 1, st.visited)?;

    let next = depth as i32 + 1;
    for n in cx.grid().neighbor_list(node) {
        let seen = cx.grid().cost(n);
        if seen <= next {
            continue;
        }
        if seen == UNREACHABLE {
            st.visited += 1;
        }
        cx.grid_mut().link(n, Some(node), next);
        cx.frontier(n, depth + 2, st.visited)?;
        if descend(cx, st, n, depth + 1)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Depth-limited depth-first search.
///
/// Expands a branch while its depth is below `limit` and abandons it at the
/// limit. Finds a path whenever one of at most `limit` moves exists, though
/// not necessarily the shortest. Frontier size in notifications is the
/// current recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimited {
    pub limit: usize,
}

impl DepthLimited {
    /// Limit used when none is configured.
    pub const DEFAULT_LIMIT: usize = 25;

    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for DepthLimited {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

impl SearchStrategy for DepthLimited {
    fn name(&self) -> &'static str {
        "depth-limited"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        match depth_limited(cx, self.limit)? {
            Limited::Found(path) => Ok(Some(path)),
            Limited::Cutoff | Limited::Exhausted => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gridsearch_core::{Grid, Layout, chebyshev};

    use super::*;
    use crate::notify::{Quiet, Signal, StepRole};
    use crate::outcome::SearchOutcome;
    use crate::spawner::NoObstacles;

    const LONG: Duration = Duration::from_secs(60);

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn maze() -> Layout {
        Layout::parse(
            "
            S.#....
            ..#.##.
            ..#..#.
            .##.#..
            ....#.T
            ",
        )
        .unwrap()
    }

    #[test]
    fn corridor_respects_limit() {
        let mut g = Grid::new(1, 5).unwrap();
        let short = DepthLimited::new(3)
            .run(&mut g, c(0, 0), c(0, 4), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(short, SearchOutcome::NotFound);
        let enough = DepthLimited::new(4)
            .run(&mut g, c(0, 0), c(0, 4), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(enough.moves(), Some(4));
    }

    #[test]
    fn maze_threshold_is_shortest_length() {
        let mut l = maze();
        for limit in 5..=8 {
            let out = DepthLimited::new(limit)
                .run(&mut l.grid, l.start, l.target, &mut Quiet, &mut NoObstacles, LONG)
                .unwrap();
            assert_eq!(out, SearchOutcome::NotFound, "limit {limit}");
        }
        for limit in 9..=12 {
            let out = DepthLimited::new(limit)
                .run(&mut l.grid, l.start, l.target, &mut Quiet, &mut NoObstacles, LONG)
                .unwrap();
            let moves = out.moves().unwrap();
            assert!(moves <= limit, "limit {limit} gave {moves} moves");
        }
    }

    #[test]
    fn default_limit_path_is_pinned() {
        let mut l = maze();
        let out = DepthLimited::default()
            .run(&mut l.grid, l.start, l.target, &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        let path = out.path().unwrap();
        assert_eq!(path.len(), 21);
        assert_eq!(path[..5], [c(0, 0), c(0, 1), c(1, 1), c(2, 1), c(2, 0)]);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
    }

    #[test]
    fn open_grid_at_exact_limit() {
        let mut g = Grid::new(5, 5).unwrap();
        let out = DepthLimited::new(4)
            .run(&mut g, c(0, 0), c(4, 4), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(
            out.path().unwrap(),
            &[c(0, 0), c(1, 1), c(2, 2), c(3, 3), c(4, 4)]
        );
        assert_eq!(out.moves(), Some(chebyshev(c(0, 0), c(4, 4)) as usize));
    }

    #[test]
    fn reentry_only_through_shallower_route() {
        let mut g = Grid::new(3, 3).unwrap();
        let mut log = Vec::new();
        let mut notify = |n: Coord, role: StepRole, f: usize, v: usize| {
            log.push((n, role, f, v));
            Signal::Continue
        };
        let out = DepthLimited::new(2)
            .run(&mut g, c(0, 0), c(2, 2), &mut notify, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out.path().unwrap(), &[c(0, 0), c(1, 1), c(2, 2)]);
        assert_eq!(log.len(), 14);
        assert_eq!(log[0], (c(0, 0), StepRole::Explored, 1, 1));
        // (1, 0) is first reached at depth 2 under (0, 1), then again at
        // depth 1 directly from the start.
        assert_eq!(log[6], (c(1, 0), StepRole::Frontier, 3, 6));
        assert_eq!(log[7], (c(1, 0), StepRole::Frontier, 2, 6));
        assert_eq!(log[13], (c(2, 2), StepRole::Frontier, 3, 9));
    }

    #[test]
    fn zero_limit_only_finds_start() {
        let mut g = Grid::new(2, 2).unwrap();
        let same = DepthLimited::new(0)
            .run(&mut g, c(0, 0), c(0, 0), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(same.path().unwrap(), &[c(0, 0)]);
        let other = DepthLimited::new(0)
            .run(&mut g, c(0, 0), c(0, 1), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(other, SearchOutcome::NotFound);
    }

    #[test]
    fn parent_chain_is_acyclic() {
        let mut l = maze();
        DepthLimited::new(30)
            .run(&mut l.grid, l.start, l.target, &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        for node in l.grid.nodes() {
            if let Some(p) = node.parent {
                assert!(l.grid.cost(p) < node.cost);
            }
        }
    }
}
