//! Error types for pipeline runs

use jobsift_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level failures; per-record failures never surface here
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file is missing
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Output store cannot be written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(path) => PipelineError::NotFound(path),
            StoreError::Persistence(msg) => PipelineError::Persistence(msg),
            other => PipelineError::Store(other.to_string()),
        }
    }
}
