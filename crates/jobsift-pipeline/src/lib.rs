//! jobsift Pipeline
//!
//! Incremental ingestion of job postings: read the collector's input,
//! skip ids that were already handled, extract structured fields, append
//! one CSV row per success, and archive the input once it is drained.
//!
//! # Guarantees
//!
//! - An id is added to the identity set only after its row is durably appended.
//! - A failed record is never written, so the next run retries it.
//! - A bounded run, a cancelled run, or a run with failures never archives.
//!
//! # Usage
//!
//! ```no_run
//! use jobsift_extractor::{Extractor, ExtractorConfig};
//! use jobsift_llm::MockProvider;
//! use jobsift_pipeline::{Pipeline, PipelineConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(MockProvider::new("{}"), ExtractorConfig::default());
//! let pipeline = Pipeline::new(PipelineConfig::default().with_limit(Some(10)), extractor);
//!
//! let summary = pipeline.run().await?;
//! println!("{}", summary.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod status;
pub mod throttle;

pub use config::PipelineConfig;
pub use context::RunContext;
pub use error::PipelineError;
pub use metrics::{RunSummary, StopReason};
pub use pipeline::{identity_sources, NoopObserver, Pipeline, RunObserver};
pub use status::{inspect, QueueStatus};
pub use throttle::ThrottleController;
