use gridsearch_core::{Coord, UNREACHABLE};

use crate::notify::Notify;
use crate::path::reconstruct;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Depth-first search.
///
/// LIFO frontier with visit-on-push: a node is marked when first pushed and
/// never pushed again. The last neighbor pushed (in clockwise order) is
/// expanded first, so paths are valid but usually not the shortest. Node
/// `cost` holds the depth in the DFS tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthFirst;

impl SearchStrategy for DepthFirst {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        let start = cx.start();
        cx.grid_mut().link(start, None, 0);
        let mut stack = vec![start];
        let mut visited = 1usize;

        while let Some(cur) = stack.pop() {
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
                stack.push(n);
                visited += 1;
                cx.frontier(n, stack.len(), visited)?;
            }
            cx.restore(nbuf);

            cx.explored(cur, stack.len(), visited)?;
            cx.spawn_obstacle();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gridsearch_core::{Grid, Layout};

    use super::*;
    use crate::notify::{Quiet, Signal, StepRole};
    use crate::outcome::SearchOutcome;
    use crate::spawner::NoObstacles;

    const LONG: Duration = Duration::from_secs(60);

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn open_grid_dives_down_left_first() {
        let mut g = Grid::new(5, 5).unwrap();
        let out = DepthFirst
            .run(&mut g, c(0, 0), c(4, 4), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(
            out.path().unwrap(),
            &[c(0, 0), c(1, 1), c(2, 0), c(3, 1), c(4, 2), c(3, 3), c(4, 4)]
        );
    }

    #[test]
    fn maze_path_is_pinned() {
        let mut l = Layout::parse(
            "
            S.#....
            ..#.##.
            ..#..#.
            .##.#..
            ....#.T
            ",
        )
        .unwrap();
        let out = DepthFirst
            .run(&mut l.grid, l.start, l.target, &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out.moves(), Some(14));
        let path = out.path().unwrap();
        assert_eq!(path[..4], [c(0, 0), c(1, 1), c(2, 0), c(3, 0)]);
        assert_eq!(path[8..11], [c(1, 3), c(0, 4), c(0, 5)]);
        assert_eq!(l.grid.cost(l.target), 14);
    }

    #[test]
    fn corridor_notifications() {
        let mut g = Grid::new(1, 4).unwrap();
        let mut log = Vec::new();
        let mut notify = |n: Coord, role: StepRole, f: usize, v: usize| {
            log.push((n, role, f, v));
            Signal::Continue
        };
        let out = DepthFirst
            .run(&mut g, c(0, 0), c(0, 3), &mut notify, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out.moves(), Some(3));
        assert_eq!(
            log,
            vec![
                (c(0, 1), StepRole::Frontier, 1, 2),
                (c(0, 0), StepRole::Explored, 1, 2),
                (c(0, 2), StepRole::Frontier, 1, 3),
                (c(0, 1), StepRole::Explored, 1, 3),
                (c(0, 3), StepRole::Frontier, 1, 4),
                (c(0, 2), StepRole::Explored, 1, 4),
            ]
        );
    }

    #[test]
    fn isolated_start_is_not_found() {
        let mut g = Grid::with_walls(3, 3, [c(0, 1), c(1, 0), c(1, 1)]).unwrap();
        let out = DepthFirst
            .run(&mut g, c(0, 0), c(2, 2), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out, SearchOutcome::NotFound);
    }
}
