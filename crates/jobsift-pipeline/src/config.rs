//! Configuration for pipeline runs

use jobsift_domain::RunMode;
use jobsift_store::InputOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a run reads, writes and archives, and how much it may process
///
/// # Examples
///
/// ```
/// use jobsift_pipeline::PipelineConfig;
/// use jobsift_domain::RunMode;
///
/// let config = PipelineConfig::default().with_limit(Some(25));
/// assert_eq!(config.run_mode(), RunMode::Bounded(25));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input file produced by the collector
    pub input: PathBuf,

    /// Append-only output CSV
    pub output: PathBuf,

    /// Standing queue consulted for dedup, if any
    pub queue: Option<PathBuf>,

    /// Where drained input files are moved
    pub archive_dir: PathBuf,

    /// Input encoding
    pub input_options: InputOptions,

    /// Maximum records submitted for extraction this run; `None` drains the input
    pub limit: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/queue/jobs.jsonl"),
            output: PathBuf::from("data/output/market_data.csv"),
            queue: None,
            archive_dir: PathBuf::from("data/archive"),
            input_options: InputOptions::default(),
            limit: None,
        }
    }
}

impl PipelineConfig {
    /// Set the per-run limit
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Bounded or exhaustive, from the limit
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_limit(self.limit)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == Some(0) {
            return Err("limit must be greater than 0 (omit it to drain the input)".to_string());
        }
        if self.input == self.output {
            return Err("input and output must be different files".to_string());
        }
        if self.queue.as_ref() == Some(&self.input) {
            return Err("queue must not be the input file".to_string());
        }
        if self.input_options.delimiter.is_empty() {
            return Err("input delimiter must not be empty".to_string());
        }
        Ok(())
    }
}
