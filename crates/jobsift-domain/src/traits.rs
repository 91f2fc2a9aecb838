//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{OutputRow, RecordId};
use async_trait::async_trait;

/// Trait for structured-output LLM services
///
/// Implemented by the infrastructure layer (jobsift-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a JSON document constrained by `schema`
    ///
    /// Returns the raw text of the model's reply; validation is the caller's job.
    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, Self::Error>;

    /// Name of the model requests are sent to
    fn model_name(&self) -> &str;

    /// Whether another attempt may succeed after `error`
    fn is_retryable(_error: &Self::Error) -> bool {
        true
    }
}

/// A place that remembers which record ids were already handled
///
/// Implemented by the infrastructure layer (jobsift-store)
pub trait IdentitySource {
    /// Error type for reading the source
    type Error;

    /// Human readable name for logs
    fn name(&self) -> String;

    /// Load every id the source knows about
    ///
    /// A source that does not exist yet yields no ids.
    fn load_ids(&self) -> Result<Vec<RecordId>, Self::Error>;
}

/// Durable destination for output rows
///
/// Implemented by the infrastructure layer (jobsift-store)
pub trait RowSink {
    /// Error type for write operations
    type Error;

    /// Append one row; when this returns `Ok` the row is durable
    fn append(&mut self, row: &OutputRow) -> Result<(), Self::Error>;
}
