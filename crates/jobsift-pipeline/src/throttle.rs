//! Throttle controller - per-run processing budget

use jobsift_domain::RunMode;

/// Counts records submitted for extraction against the run mode
///
/// Every submission is charged, whether or not it succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleController {
    mode: RunMode,
    submitted: usize,
}

impl ThrottleController {
    /// Start a fresh budget
    pub fn new(mode: RunMode) -> Self {
        Self { mode, submitted: 0 }
    }

    /// Mode this controller enforces
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Records submitted so far
    pub fn submitted_count(&self) -> usize {
        self.submitted
    }

    /// Charge one submission
    pub fn record_submitted(&mut self) {
        self.submitted += 1;
    }

    /// Whether the budget is spent
    pub fn should_stop(&self) -> bool {
        self.mode.is_exhausted(self.submitted)
    }

    /// Whether a drained input may be archived
    pub fn should_archive(&self) -> bool {
        self.mode.archives_on_drain()
    }
}
