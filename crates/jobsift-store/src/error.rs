//! Error types for the filesystem stores

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input file does not exist
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// One input line could not be parsed
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be durably written
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The consumed input could not be relocated
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
