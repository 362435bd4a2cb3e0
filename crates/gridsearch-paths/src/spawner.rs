use gridsearch_core::{Coord, Grid};

/// Source of transient obstacles, consulted once per outer search iteration.
///
/// Implementations flag at most one cell per call and return it. Cells in
/// `keep_clear` (the current start and target) must never be flagged.
pub trait ObstacleSpawner {
    fn spawn(&mut self, grid: &mut Grid, keep_clear: &[Coord]) -> Option<Coord>;
}

impl<T: ObstacleSpawner + ?Sized> ObstacleSpawner for &mut T {
    #[inline]
    fn spawn(&mut self, grid: &mut Grid, keep_clear: &[Coord]) -> Option<Coord> {
        (**self).spawn(grid, keep_clear)
    }
}

/// Spawner that never blocks anything. Makes searches deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstacles;

impl ObstacleSpawner for NoObstacles {
    #[inline]
    fn spawn(&mut self, _: &mut Grid, _: &[Coord]) -> Option<Coord> {
        None
    }
}
