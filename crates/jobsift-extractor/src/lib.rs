//! jobsift Extractor
//!
//! Turns one raw job posting into typed, validated extraction fields using a
//! structured-output LLM.
//!
//! # Architecture
//!
//! ```text
//! RawRecord → PromptBuilder → LlmProvider (schema-constrained) → parser → ExtractedFields
//!                                  ↑______ RetryPolicy ______|
//! ```
//!
//! # Key Features
//!
//! - **Schema from types**: the JSON Schema sent to the model is generated
//!   from the domain types, so the contract cannot drift
//! - **Lenient parsing**: code fences, enum casing and numeric strings are
//!   tolerated; structural mismatches are retried
//! - **Bounded retries**: exponential backoff with a cap; one record's
//!   exhaustion surfaces as `ExtractionFailed`
//!
//! # Example Usage
//!
//! ```
//! use jobsift_domain::{AnalysisVariant, RawRecord, RecordId};
//! use jobsift_extractor::{Extractor, ExtractorConfig};
//! use jobsift_llm::MockProvider;
//!
//! # tokio_test::block_on(async {
//! let llm = MockProvider::new(r#"{
//!     "title": "Backend Engineer", "company": "Acme",
//!     "languages": ["Rust"], "frameworks": [], "tools": ["Postgres"],
//!     "cloud_platforms": ["AWS"], "work_setting": "remote",
//!     "min_years_experience": null, "seniority_level": "Unknown"
//! }"#);
//! let config = ExtractorConfig {
//!     variant: AnalysisVariant::Simple,
//!     ..Default::default()
//! };
//! let extractor = Extractor::new(llm, config);
//!
//! let record = RawRecord {
//!     id: RecordId::new("job-1"),
//!     title: "Backend Engineer".to_string(),
//!     company: "Acme".to_string(),
//!     location: "Dublin".to_string(),
//!     description: "Rust, Postgres, AWS".to_string(),
//! };
//!
//! let fields = extractor.extract(&record).await.unwrap();
//! assert_eq!(fields.base().languages, vec!["rust"]);
//! # });
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod schema;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_response;
pub use prompt::PromptBuilder;
pub use retry::RetryPolicy;
pub use schema::extraction_schema;
