//! Run summary - counts collected during one pipeline run

use std::fmt;
use std::path::PathBuf;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// The input was consumed to the end
    #[default]
    Drained,
    /// The per-run limit was reached
    LimitReached,
    /// A shutdown signal arrived
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Drained => f.write_str("input drained"),
            StopReason::LimitReached => f.write_str("limit reached"),
            StopReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Counts collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records read from the input (valid lines only)
    pub seen: usize,

    /// Records skipped because their id was already handled
    pub skipped_duplicate: usize,

    /// Records extracted and appended
    pub processed: usize,

    /// Records whose extraction failed after all attempts
    pub failed: usize,

    /// Records extracted but not written
    pub unpersisted: usize,

    /// Input lines that could not be parsed
    pub malformed: usize,

    /// Archive destination, when the input was archived
    pub archived: Option<PathBuf>,

    /// Why the run ended
    pub stopped_by: StopReason,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that were attempted but did not make it into the output
    pub fn total_failed(&self) -> usize {
        self.failed + self.unpersisted
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Summary".to_string(),
            "===========".to_string(),
            format!("Stopped: {}", self.stopped_by),
            format!("Seen: {}", self.seen),
            format!("Skipped (already processed): {}", self.skipped_duplicate),
            format!("Processed: {}", self.processed),
            format!("Failed: {}", self.failed),
        ];

        if self.unpersisted > 0 {
            lines.push(format!("Not persisted: {}", self.unpersisted));
        }
        if self.malformed > 0 {
            lines.push(format!("Malformed lines: {}", self.malformed));
        }
        match &self.archived {
            Some(path) => lines.push(format!("Archived to: {}", path.display())),
            None => lines.push("Archived: no".to_string()),
        }

        lines.join("\n")
    }
}
