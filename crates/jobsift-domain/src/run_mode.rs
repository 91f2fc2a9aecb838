//! Run mode - bounded versus exhaustive processing

use serde::{Deserialize, Serialize};

/// How much of the input a run may process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Stop after this many records were submitted for extraction; never archives
    Bounded(usize),
    /// Process until the input is drained, then archive it
    #[default]
    Exhaustive,
}

impl RunMode {
    /// Build from an optional record limit
    pub fn from_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(n) => RunMode::Bounded(n),
            None => RunMode::Exhaustive,
        }
    }

    /// Record limit, if any
    pub fn limit(&self) -> Option<usize> {
        match self {
            RunMode::Bounded(n) => Some(*n),
            RunMode::Exhaustive => None,
        }
    }

    /// Whether the limit is reached after `submitted` records were sent for extraction
    pub fn is_exhausted(&self, submitted: usize) -> bool {
        matches!(self, RunMode::Bounded(n) if submitted >= *n)
    }

    /// Whether draining the input should archive it
    pub fn archives_on_drain(&self) -> bool {
        matches!(self, RunMode::Exhaustive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_limit() {
        assert_eq!(RunMode::from_limit(Some(5)), RunMode::Bounded(5));
        assert_eq!(RunMode::from_limit(None), RunMode::Exhaustive);
        assert_eq!(RunMode::Bounded(2).limit(), Some(2));
    }

    #[test]
    fn test_exhaustion() {
        let mode = RunMode::Bounded(2);
        assert!(!mode.is_exhausted(1));
        assert!(mode.is_exhausted(2));
        assert!(!RunMode::Exhaustive.is_exhausted(usize::MAX));
    }

    #[test]
    fn test_only_exhaustive_archives() {
        assert!(RunMode::Exhaustive.archives_on_drain());
        assert!(!RunMode::Bounded(10).archives_on_drain());
    }
}
