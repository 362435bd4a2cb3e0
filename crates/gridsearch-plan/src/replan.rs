use std::fmt;
use std::time::Duration;

use gridsearch_core::{Coord, Grid, GridError};
use gridsearch_paths::{
    Algorithm, DEFAULT_TIMEOUT, Notify, ObstacleSpawner, SearchOutcome, SearchStrategy,
};

/// Replans allowed per run when none is configured.
pub const DEFAULT_MAX_REPLANS: usize = 100;

/// Why a run ended without reaching the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailReason {
    /// The last search exhausted the reachable cells.
    NotFound,
    /// The last search ran out of time.
    TimedOut,
    /// More replans were needed than allowed.
    ReplanLimit,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no path"),
            Self::TimedOut => f.write_str("search timed out"),
            Self::ReplanLimit => f.write_str("replan limit reached"),
        }
    }
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanOutcome {
    Success,
    Failed(FailReason),
    Cancelled,
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// One detour: the walk stopped before `blocked` and searching resumed from
/// `resume_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replan {
    pub blocked: Coord,
    pub resume_from: Coord,
}

/// Controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanState {
    /// Reset the grid and search from the current start.
    Searching,
    /// Walk the returned path.
    Moving(Vec<Coord>),
    /// A dynamic obstacle lies on the path ahead.
    Replanning(Replan),
    Done(PlanOutcome),
}

impl fmt::Display for PlanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searching => f.write_str("SEARCHING"),
            Self::Moving(path) => write!(f, "MOVING ({} cells)", path.len()),
            Self::Replanning(r) => write!(f, "REPLANNING (blocked at {})", r.blocked),
            Self::Done(PlanOutcome::Success) => f.write_str("SUCCESS"),
            Self::Done(PlanOutcome::Failed(reason)) => write!(f, "FAILED ({reason})"),
            Self::Done(PlanOutcome::Cancelled) => f.write_str("CANCELLED"),
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanReport {
    pub outcome: PlanOutcome,
    /// Cells actually walked, from the initial start onwards. A cell where
    /// the walk resumed after a replan appears once.
    pub traversed: Vec<Coord>,
    pub replans: Vec<Replan>,
    /// Number of searches run, the first one included.
    pub searches: usize,
}

impl PlanReport {
    fn new() -> Self {
        Self {
            outcome: PlanOutcome::Cancelled,
            traversed: Vec::new(),
            replans: Vec::new(),
            searches: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == PlanOutcome::Success
    }

    /// Moves walked.
    pub fn moves(&self) -> usize {
        self.traversed.len().saturating_sub(1)
    }
}

/// Search, walk and search again around dynamic obstacles.
///
/// Each search starts from a reset grid. While walking the result, the first
/// cell found flagged dynamic stops the walk: its flag is cleared, the start
/// moves to the cell before it and a new search begins. Searches that end
/// without a path finish the run; nothing is retried on its own.
#[derive(Debug, Clone)]
pub struct Replanner<S> {
    algorithm: Algorithm,
    start: Coord,
    target: Coord,
    timeout: Duration,
    max_replans: usize,
    spawner: S,
}

impl<S: ObstacleSpawner> Replanner<S> {
    pub fn new(algorithm: Algorithm, start: Coord, target: Coord, spawner: S) -> Self {
        Self {
            algorithm,
            start,
            target,
            timeout: DEFAULT_TIMEOUT,
            max_replans: DEFAULT_MAX_REPLANS,
            spawner,
        }
    }

    /// Time budget for each search.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_replans(mut self, max_replans: usize) -> Self {
        self.max_replans = max_replans;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Current start; after a replan, the cell the walk resumed from.
    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn target(&self) -> Coord {
        self.target
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Run until success, failure or cancellation.
    ///
    /// Fails only if the start or target is outside `grid` or on a wall.
    pub fn run<N: Notify>(
        &mut self,
        grid: &mut Grid,
        notify: &mut N,
    ) -> Result<PlanReport, GridError> {
        grid.check_endpoint(self.start)?;
        grid.check_endpoint(self.target)?;

        let mut report = PlanReport::new();
        let mut state = PlanState::Searching;
        loop {
            state = match state {
                PlanState::Done(outcome) => {
                    report.outcome = outcome;
                    break;
                }
                PlanState::Searching => self.search(grid, notify, &mut report)?,
                PlanState::Moving(path) => self.walk(grid, &path, &mut report),
                PlanState::Replanning(replan) => self.replan(grid, replan, &mut report)?,
            };
            log::debug!("plan state: {state}");
        }

        log::info!(
            "{} {} -> {}: {} after {} searches, {} replans, {} moves",
            self.algorithm,
            report.traversed.first().copied().unwrap_or(self.start),
            self.target,
            report.outcome,
            report.searches,
            report.replans.len(),
            report.moves()
        );
        Ok(report)
    }

    fn search<N: Notify>(
        &mut self,
        grid: &mut Grid,
        notify: &mut N,
        report: &mut PlanReport,
    ) -> Result<PlanState, GridError> {
        report.searches += 1;
        let outcome = self.algorithm.run(
            grid,
            self.start,
            self.target,
            notify,
            &mut self.spawner,
            self.timeout,
        )?;
        Ok(match outcome {
            SearchOutcome::Path(path) => PlanState::Moving(path),
            SearchOutcome::NotFound => PlanState::Done(PlanOutcome::Failed(FailReason::NotFound)),
            SearchOutcome::TimedOut => PlanState::Done(PlanOutcome::Failed(FailReason::TimedOut)),
            SearchOutcome::Cancelled => PlanState::Done(PlanOutcome::Cancelled),
        })
    }

    fn walk(&self, grid: &Grid, path: &[Coord], report: &mut PlanReport) -> PlanState {
        for (i, &c) in path.iter().enumerate() {
            if grid.is_dynamic(c) {
                let resume_from = if i == 0 { self.start } else { path[i - 1] };
                return PlanState::Replanning(Replan {
                    blocked: c,
                    resume_from,
                });
            }
            if report.traversed.last() != Some(&c) {
                report.traversed.push(c);
            }
        }
        PlanState::Done(PlanOutcome::Success)
    }

    fn replan(
        &mut self,
        grid: &mut Grid,
        replan: Replan,
        report: &mut PlanReport,
    ) -> Result<PlanState, GridError> {
        self.start = replan.resume_from;
        grid.clear_dynamic(replan.blocked)?;
        report.replans.push(replan);
        if report.replans.len() > self.max_replans {
            log::warn!(
                "giving up at {} after {} replans",
                self.start,
                self.max_replans
            );
            return Ok(PlanState::Done(PlanOutcome::Failed(FailReason::ReplanLimit)));
        }
        Ok(PlanState::Searching)
    }
}
