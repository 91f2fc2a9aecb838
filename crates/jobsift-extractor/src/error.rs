//! Error types for the Extractor

use jobsift_domain::RecordId;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {message}")]
    Llm {
        /// Provider message
        message: String,
        /// Whether the provider considers a retry worthwhile
        retryable: bool,
    },

    /// Extraction timeout
    #[error("Extraction timeout after {0} ms")]
    Timeout(u64),

    /// Response is not a JSON document
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Response JSON does not match the extraction schema
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// All attempts for one record failed
    #[error("Extraction failed for {record_id} after {attempts} attempt(s): {last_error}")]
    ExtractionFailed {
        /// Record that could not be extracted
        record_id: RecordId,
        /// Attempts made
        attempts: u32,
        /// Message of the final failure
        last_error: String,
    },
}

impl ExtractorError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ExtractorError::Llm { retryable, .. } => *retryable,
            ExtractorError::Timeout(_)
            | ExtractorError::InvalidFormat(_)
            | ExtractorError::Validation(_) => true,
            ExtractorError::Config(_) | ExtractorError::ExtractionFailed { .. } => false,
        }
    }
}
