//! jobsift Domain Layer
//!
//! This crate contains the data model for the incremental ingestion pipeline.
//! It performs no I/O and defines the value types and trait seams that the
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **RawRecord**: One job posting as produced by the external collector
//! - **ExtractedFields**: Typed fields returned by the extraction service,
//!   in a Simple or Complex variant
//! - **OutputRow**: The flat, persisted merge of a record and its extraction
//! - **IdentitySet**: Ids already durably recorded; the sole dedup authority
//! - **RunMode**: Bounded (limited) or Exhaustive (drain and archive) runs
//!
//! ## Architecture
//!
//! - Pure data model and functions only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod identity;
pub mod record;
pub mod row;
pub mod run_mode;
pub mod traits;

// Re-exports for convenience
pub use analysis::{
    normalize_tags, AnalysisVariant, ComplexAnalysis, ExtractedFields, Salary, SalaryInterval, SeniorityLevel,
    SimpleAnalysis, WorkSetting,
};
pub use identity::{derive_identity_set, IdentitySet};
pub use traits::{IdentitySource, LlmProvider, RowSink};
pub use record::{RawRecord, RecordId};
pub use row::{merge, output_columns, OutputRow, LIST_SEPARATOR, PASS_THROUGH_COLUMNS};
pub use run_mode::RunMode;
