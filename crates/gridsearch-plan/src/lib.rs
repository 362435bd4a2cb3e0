//! Drive a search across a grid whose cells may become blocked while the
//! agent is walking.
//!
//! A [`Replanner`] repeatedly searches with a configured
//! [`Algorithm`](gridsearch_paths::Algorithm), walks the returned path and,
//! when the next cell turns out to be a dynamic obstacle, searches again
//! from the last safe cell. [`RandomSpawner`] supplies the obstacles and
//! [`PlanConfig`] gathers every run option in one place.

mod config;
mod obstacles;
mod replan;

pub use config::{ConfigError, PlanConfig};
pub use obstacles::{DEFAULT_PROBABILITY, RandomSpawner};
pub use replan::{
    DEFAULT_MAX_REPLANS, FailReason, PlanOutcome, PlanReport, PlanState, Replan, Replanner,
};
