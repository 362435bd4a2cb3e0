use std::fmt;
use std::time::Duration;

use gridsearch_core::{Coord, Grid, GridError, Layout};
use gridsearch_paths::{
    Algorithm, AlgorithmKind, DEFAULT_TIMEOUT, DepthLimited, IterativeDeepening, ObstacleSpawner,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::obstacles::{DEFAULT_PROBABILITY, RandomSpawner};
use crate::replan::{DEFAULT_MAX_REPLANS, Replanner};

/// Invalid run configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Obstacle probability outside `0.0..=1.0`.
    InvalidProbability(f64),
    /// Timeout not a positive, representable number of seconds.
    InvalidTimeout(f64),
    ZeroDepthLimit,
    ZeroMaxDepth,
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability(p) => {
                write!(f, "config: obstacle probability {p} is not within 0..=1")
            }
            Self::InvalidTimeout(t) => write!(f, "config: timeout {t}s must be positive"),
            Self::ZeroDepthLimit => f.write_str("config: depth limit must be at least 1"),
            Self::ZeroMaxDepth => f.write_str("config: max depth must be at least 1"),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Every option of a run.
///
/// `map`, when set, is an ASCII layout that replaces `rows`, `cols`,
/// `walls`, `start` and `target`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlanConfig {
    pub rows: i32,
    pub cols: i32,
    pub walls: Vec<Coord>,
    pub start: Coord,
    pub target: Coord,
    pub algorithm: AlgorithmKind,
    pub timeout_secs: f64,
    pub depth_limit: usize,
    pub max_depth: usize,
    pub obstacle_probability: f64,
    pub max_replans: usize,
    pub seed: Option<u64>,
    pub map: Option<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 40,
            walls: Vec::new(),
            start: Coord::new(5, 5),
            target: Coord::new(30, 30),
            algorithm: AlgorithmKind::default(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            depth_limit: DepthLimited::DEFAULT_LIMIT,
            max_depth: IterativeDeepening::DEFAULT_MAX_DEPTH,
            obstacle_probability: DEFAULT_PROBABILITY,
            max_replans: DEFAULT_MAX_REPLANS,
            seed: None,
            map: None,
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.obstacle_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        let t = self.timeout_secs;
        if t <= 0.0 || Duration::try_from_secs_f64(t).is_err() {
            return Err(ConfigError::InvalidTimeout(t));
        }
        if self.depth_limit == 0 {
            return Err(ConfigError::ZeroDepthLimit);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn algorithm(&self) -> Algorithm {
        Algorithm::from_kind(self.algorithm, self.depth_limit, self.max_depth)
    }

    /// Validate and build the grid with its endpoints.
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        self.validate()?;
        if let Some(map) = &self.map {
            return Ok(Layout::parse(map)?);
        }
        let mut grid = Grid::new(self.rows, self.cols)?;
        for &w in &self.walls {
            grid.set_wall(w, true)?;
        }
        grid.check_endpoint(self.start)?;
        grid.check_endpoint(self.target)?;
        Ok(Layout {
            grid,
            start: self.start,
            target: self.target,
        })
    }

    /// Obstacle source for this run, seeded from `seed` or from the OS.
    pub fn spawner(&self) -> RandomSpawner<StdRng> {
        match self.seed {
            Some(seed) => RandomSpawner::seeded(self.obstacle_probability, seed),
            None => RandomSpawner::new(self.obstacle_probability, StdRng::from_os_rng()),
        }
    }

    /// Controller for `layout`'s endpoints with this configuration's limits.
    pub fn replanner<S: ObstacleSpawner>(&self, layout: &Layout, spawner: S) -> Replanner<S> {
        Replanner::new(self.algorithm(), layout.start, layout.target, spawner)
            .with_timeout(self.timeout())
            .with_max_replans(self.max_replans)
    }
}

#[cfg(test)]
mod tests {
    use gridsearch_paths::{Quiet, SearchStrategy};

    use super::*;
    use crate::replan::PlanOutcome;

    #[test]
    fn defaults() {
        let cfg = PlanConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.algorithm(), Algorithm::BreadthFirst);
        let l = cfg.layout().unwrap();
        assert_eq!(l.grid.rows(), 40);
        assert_eq!(l.start, Coord::new(5, 5));
        assert_eq!(l.target, Coord::new(30, 30));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = |f: fn(&mut PlanConfig)| {
            let mut cfg = PlanConfig::default();
            f(&mut cfg);
            cfg.validate().unwrap_err()
        };
        assert_eq!(
            bad(|c| c.obstacle_probability = 1.5),
            ConfigError::InvalidProbability(1.5)
        );
        assert_eq!(bad(|c| c.timeout_secs = 0.0), ConfigError::InvalidTimeout(0.0));
        assert_eq!(bad(|c| c.timeout_secs = 1e30), ConfigError::InvalidTimeout(1e30));
        assert!(matches!(
            bad(|c| c.timeout_secs = f64::INFINITY),
            ConfigError::InvalidTimeout(_)
        ));
        assert_eq!(bad(|c| c.depth_limit = 0), ConfigError::ZeroDepthLimit);
        assert_eq!(bad(|c| c.max_depth = 0), ConfigError::ZeroMaxDepth);
        assert!(matches!(
            bad(|c| c.obstacle_probability = f64::NAN),
            ConfigError::InvalidProbability(_)
        ));
    }

    #[test]
    fn endpoint_on_wall_is_a_grid_error() {
        let cfg = PlanConfig {
            walls: vec![Coord::new(30, 30)],
            ..PlanConfig::default()
        };
        let err = cfg.layout().unwrap_err();
        assert_eq!(err, ConfigError::Grid(GridError::Blocked(Coord::new(30, 30))));
        assert_eq!(err.to_string(), "grid: endpoint (30, 30) is a wall");
    }

    #[test]
    fn map_overrides_dimensions() {
        let cfg = PlanConfig {
            map: Some("S.#\n..#\n..T".into()),
            algorithm: AlgorithmKind::Dls,
            depth_limit: 3,
            ..PlanConfig::default()
        };
        let l = cfg.layout().unwrap();
        assert_eq!(l.grid.rows(), 3);
        assert_eq!(l.target, Coord::new(2, 2));
        assert_eq!(cfg.algorithm(), Algorithm::DepthLimited { limit: 3 });
    }

    #[test]
    fn seeded_run_is_reproducible() {
        let cfg = PlanConfig {
            rows: 15,
            cols: 15,
            start: Coord::new(0, 0),
            target: Coord::new(14, 14),
            obstacle_probability: 0.3,
            seed: Some(5),
            ..PlanConfig::default()
        };
        let run = || {
            let mut l = cfg.layout().unwrap();
            let mut r = cfg.replanner(&l, cfg.spawner());
            r.run(&mut l.grid, &mut Quiet).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn walls_are_applied() {
        let cfg = PlanConfig {
            rows: 3,
            cols: 3,
            walls: vec![Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
            start: Coord::new(0, 0),
            target: Coord::new(0, 2),
            obstacle_probability: 0.0,
            ..PlanConfig::default()
        };
        let mut l = cfg.layout().unwrap();
        let out = cfg
            .algorithm()
            .run(
                &mut l.grid,
                l.start,
                l.target,
                &mut Quiet,
                &mut cfg.spawner(),
                cfg.timeout(),
            )
            .unwrap();
        assert!(!out.is_found());
        let mut r = cfg.replanner(&l, cfg.spawner());
        let report = r.run(&mut l.grid, &mut Quiet).unwrap();
        assert!(matches!(report.outcome, PlanOutcome::Failed(_)));
    }
}
