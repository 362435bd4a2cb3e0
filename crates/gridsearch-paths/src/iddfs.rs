use gridsearch_core::Coord;

use crate::dls::{Limited, depth_limited};
use crate::notify::Notify;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Iterative deepening depth-first search.
///
/// Runs a depth-limited search with limits `1, 2, ..., max_depth`, clearing
/// the grid's search state between rounds, and returns the first path found.
/// Stops early once a round finishes without cutting any branch, since no
/// larger limit can reach more cells. Every round notifies from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterativeDeepening {
    pub max_depth: usize,
}

impl IterativeDeepening {
    /// Largest limit tried when none is configured.
    pub const DEFAULT_MAX_DEPTH: usize = 300;

    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for IterativeDeepening {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

impl SearchStrategy for IterativeDeepening {
    fn name(&self) -> &'static str {
        "iterative-deepening"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        if cx.start() == cx.target() {
            return Ok(Some(vec![cx.start()]));
        }
        for limit in 1..=self.max_depth {
            cx.poll()?;
            cx.grid_mut().reset();
            match depth_limited(cx, limit)? {
                Limited::Found(path) => {
                    log::trace!("iterative deepening found a path at limit {limit}");
                    return Ok(Some(path));
                }
                Limited::Cutoff => {}
                Limited::Exhausted => {
                    log::trace!("iterative deepening exhausted at limit {limit}");
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gridsearch_core::{Grid, Layout};

    use super::*;
    use crate::bfs::BreadthFirst;
    use crate::notify::{Quiet, Signal, StepRole};
    use crate::outcome::SearchOutcome;
    use crate::spawner::{NoObstacles, ObstacleSpawner};

    const LONG: Duration = Duration::from_secs(60);

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    const MAZE: &str = "
        S.#....
        ..#.##.
        ..#..#.
        .##.#..
        ....#.T
    ";

    #[test]
    fn matches_breadth_first() {
        let mut a = Layout::parse(MAZE).unwrap();
        let mut b = a.clone();
        let deep = IterativeDeepening::default()
            .run(&mut a.grid, a.start, a.target, &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        let wide = BreadthFirst
            .run(&mut b.grid, b.start, b.target, &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(deep, wide);
        assert_eq!(deep.moves(), Some(9));

        let mut g = Grid::new(5, 5).unwrap();
        let out = IterativeDeepening::default()
            .run(&mut g, c(0, 0), c(4, 4), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(
            out.path().unwrap(),
            &[c(0, 0), c(1, 1), c(2, 2), c(3, 3), c(4, 4)]
        );
    }

    #[test]
    fn rounds_notify_from_scratch() {
        let mut g = Grid::new(3, 3).unwrap();
        let mut log = Vec::new();
        let mut notify = |n: Coord, role: StepRole, f: usize, v: usize| {
            log.push((n, role, f, v));
            Signal::Continue
        };
        let out = IterativeDeepening::default()
            .run(&mut g, c(0, 0), c(2, 2), &mut notify, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out.path().unwrap(), &[c(0, 0), c(1, 1), c(2, 2)]);
        assert_eq!(
            log[..5],
            [
                (c(0, 0), StepRole::Explored, 1, 1),
                (c(0, 1), StepRole::Frontier, 2, 2),
                (c(1, 0), StepRole::Frontier, 2, 3),
                (c(1, 1), StepRole::Frontier, 2, 4),
                (c(0, 0), StepRole::Explored, 1, 1),
            ]
        );
        assert_eq!(log.len(), 4 + 14);
    }

    #[test]
    fn exhausted_region_stops_early() {
        let mut l = Layout::parse(
            "
            S.#..
            ..#..
            ###..
            ...#T
            ",
        )
        .unwrap();
        let mut rounds = 0;
        let mut notify = |n: Coord, role: StepRole, _f: usize, _v: usize| {
            if n == c(0, 0) && role == StepRole::Explored {
                rounds += 1;
            }
            Signal::Continue
        };
        let out = IterativeDeepening::default()
            .run(&mut l.grid, l.start, l.target, &mut notify, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out, SearchOutcome::NotFound);
        assert!(rounds < 5, "ran {rounds} rounds");
    }

    #[test]
    fn max_depth_bounds_the_rounds() {
        let mut g = Grid::new(1, 6).unwrap();
        let out = IterativeDeepening::new(4)
            .run(&mut g, c(0, 0), c(0, 5), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out, SearchOutcome::NotFound);
        let out = IterativeDeepening::new(5)
            .run(&mut g, c(0, 0), c(0, 5), &mut Quiet, &mut NoObstacles, LONG)
            .unwrap();
        assert_eq!(out.moves(), Some(5));
    }

    struct Counting(usize);

    impl ObstacleSpawner for Counting {
        fn spawn(&mut self, _grid: &mut Grid, _keep_clear: &[Coord]) -> Option<Coord> {
            self.0 += 1;
            None
        }
    }

    #[test]
    fn spawner_consulted_once_per_round() {
        let mut g = Grid::new(1, 4).unwrap();
        let mut spawner = Counting(0);
        let out = IterativeDeepening::default()
            .run(&mut g, c(0, 0), c(0, 3), &mut Quiet, &mut spawner, LONG)
            .unwrap();
        assert_eq!(out.moves(), Some(3));
        assert_eq!(spawner.0, 3);
    }
}
