use std::time::{Duration, Instant};

/// Budget used when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wall-clock budget measured from construction.
///
/// Searches poll it once per outer iteration; an expansion in progress is
/// never interrupted.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start the clock now.
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Whether the budget is used up. A zero budget is expired immediately.
    #[inline]
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    /// Time since the clock started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left, zero once expired.
    #[inline]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    /// The configured budget.
    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}
