use gridsearch_core::{Coord, Grid};
use gridsearch_paths::ObstacleSpawner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spawn probability used when none is configured.
pub const DEFAULT_PROBABILITY: f64 = 0.02;

/// Blocks a uniformly random cell with a fixed probability per call.
///
/// A drawn cell that is a wall, already dynamic, or listed in `keep_clear`
/// is left alone and the call spawns nothing.
#[derive(Debug, Clone)]
pub struct RandomSpawner<R: Rng> {
    probability: f64,
    rng: R,
}

impl<R: Rng> RandomSpawner<R> {
    /// `probability` is clamped to `0.0..=1.0`.
    pub fn new(probability: f64, rng: R) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl RandomSpawner<StdRng> {
    /// Reproducible spawner.
    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::new(probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ObstacleSpawner for RandomSpawner<R> {
    fn spawn(&mut self, grid: &mut Grid, keep_clear: &[Coord]) -> Option<Coord> {
        if self.probability <= 0.0 || self.rng.random::<f64>() >= self.probability {
            return None;
        }
        let c = Coord::new(
            self.rng.random_range(0..grid.rows()),
            self.rng.random_range(0..grid.cols()),
        );
        if keep_clear.contains(&c) {
            return None;
        }
        match grid.set_dynamic(c) {
            Ok(true) => Some(c),
            _ => None,
        }
    }
}
