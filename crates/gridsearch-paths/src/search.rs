use std::fmt;
use std::time::Duration;

use gridsearch_core::{Coord, Grid, GridError};

use crate::deadline::Deadline;
use crate::notify::{Notify, Signal, StepRole};
use crate::outcome::SearchOutcome;
use crate::spawner::ObstacleSpawner;

/// Early exit from a running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Cancelled,
    TimedOut,
}

impl From<Interrupt> for SearchOutcome {
    fn from(i: Interrupt) -> Self {
        match i {
            Interrupt::Cancelled => SearchOutcome::Cancelled,
            Interrupt::TimedOut => SearchOutcome::TimedOut,
        }
    }
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Everything one search run works with: the grid, its endpoints, the step
/// observer, the obstacle source and the deadline.
///
/// Strategies interact with the observer, spawner and clock only through
/// this type so that the notification, cancellation and timeout rules are
/// the same for all of them.
pub struct Search<'a, N, S> {
    grid: &'a mut Grid,
    start: Coord,
    target: Coord,
    notify: &'a mut N,
    spawner: &'a mut S,
    deadline: Deadline,
    nbuf: Vec<Coord>,
    steps: usize,
}

impl<'a, N: Notify, S: ObstacleSpawner> Search<'a, N, S> {
    /// Build a context; the clock starts now.
    pub fn new(
        grid: &'a mut Grid,
        start: Coord,
        target: Coord,
        notify: &'a mut N,
        spawner: &'a mut S,
        timeout: Duration,
    ) -> Self {
        Self {
            grid,
            start,
            target,
            notify,
            spawner,
            deadline: Deadline::new(timeout),
            nbuf: Vec::with_capacity(8),
            steps: 0,
        }
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Coord {
        self.target
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut *self.grid
    }

    /// Number of observer calls made so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Fail with [`Interrupt::TimedOut`] once the deadline has passed.
    #[inline]
    pub fn poll(&self) -> Result<(), Interrupt> {
        if self.deadline.expired() {
            return Err(Interrupt::TimedOut);
        }
        Ok(())
    }

    fn report(
        &mut self,
        node: Coord,
        role: StepRole,
        frontier: usize,
        visited: usize,
    ) -> Result<(), Interrupt> {
        self.steps += 1;
        match self.notify.notify(node, role, frontier, visited) {
            Signal::Continue => Ok(()),
            Signal::Cancel => Err(Interrupt::Cancelled),
        }
    }

    /// Report a frontier admission.
    #[inline]
    pub fn frontier(
        &mut self,
        node: Coord,
        frontier: usize,
        visited: usize,
    ) -> Result<(), Interrupt> {
        self.report(node, StepRole::Frontier, frontier, visited)
    }

    /// Report an expansion.
    #[inline]
    pub fn explored(
        &mut self,
        node: Coord,
        frontier: usize,
        visited: usize,
    ) -> Result<(), Interrupt> {
        self.report(node, StepRole::Explored, frontier, visited)
    }

    /// Let the spawner block one cell. Start and target are always kept clear.
    pub fn spawn_obstacle(&mut self) -> Option<Coord> {
        let keep_clear = [self.start, self.target];
        let spawned = self.spawner.spawn(&mut *self.grid, &keep_clear);
        if let Some(c) = spawned {
            log::trace!("dynamic obstacle spawned at {c}");
        }
        spawned
    }

    /// Traversable neighbours of `c` in clockwise order, in a reused buffer.
    ///
    /// Hand the buffer back with [`restore`](Search::restore) to avoid
    /// reallocating on the next expansion.
    pub fn take_neighbors(&mut self, c: Coord) -> Vec<Coord> {
        let mut buf = std::mem::take(&mut self.nbuf);
        buf.clear();
        self.grid.neighbors(c, &mut buf);
        buf
    }

    /// Return a buffer obtained from [`take_neighbors`](Search::take_neighbors).
    #[inline]
    pub fn restore(&mut self, buf: Vec<Coord>) {
        self.nbuf = buf;
    }
}

// ---------------------------------------------------------------------------
// SearchStrategy
// ---------------------------------------------------------------------------

/// Shared interface of all search algorithms.
pub trait SearchStrategy {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Run the strategy on a prepared context.
    ///
    /// Returns `Ok(Some(path))` on success and `Ok(None)` when the reachable
    /// space is exhausted.
    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt>;

    /// Validate the endpoints, reset the grid's search state and run.
    ///
    /// Fails only when `start` or `target` is out of bounds or on a wall;
    /// every search result, including cancellation and timeout, is a
    /// [`SearchOutcome`].
    fn run<N: Notify, S: ObstacleSpawner>(
        &self,
        grid: &mut Grid,
        start: Coord,
        target: Coord,
        notify: &mut N,
        spawner: &mut S,
        timeout: Duration,
    ) -> Result<SearchOutcome, GridError> {
        grid.check_endpoint(start)?;
        grid.check_endpoint(target)?;
        grid.reset();

        let mut cx = Search::new(grid, start, target, notify, spawner, timeout);
        let outcome = match self.search(&mut cx) {
            Ok(Some(path)) => SearchOutcome::Path(path),
            Ok(None) => SearchOutcome::NotFound,
            Err(interrupt) => interrupt.into(),
        };
        log::debug!(
            "{} {start} -> {target}: {outcome} after {} steps",
            self.name(),
            cx.steps()
        );
        Ok(outcome)
    }
}
