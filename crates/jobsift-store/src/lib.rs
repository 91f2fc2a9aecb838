//! jobsift Storage Layer
//!
//! Filesystem-backed implementations of the domain's store seams.
//!
//! # Components
//!
//! - [`RecordReader`]: lazy reader over the collector's input (JSONL or
//!   legacy delimited plain text)
//! - [`IdentityFile`]: id scanner over the output CSV or a standing queue
//! - [`CsvAppender`]: append-only tabular output store
//! - [`ArchiveManager`]: relocates a drained input file
//!
//! # Examples
//!
//! ```no_run
//! use jobsift_domain::{derive_identity_set, AnalysisVariant};
//! use jobsift_store::{CsvAppender, IdentityFile};
//!
//! let sources = vec![IdentityFile::for_path("data/output/market_data.csv")];
//! let seen = derive_identity_set(&sources).unwrap();
//! let _appender = CsvAppender::new("data/output/market_data.csv", AnalysisVariant::Complex);
//! println!("{} ids already processed", seen.len());
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod identity;
pub mod input;
pub mod output;

pub use archive::ArchiveManager;
pub use error::{Result, StoreError};
pub use identity::{CsvIdentitySource, IdentityFile, JsonlIdentitySource};
pub use input::{InputFormat, InputOptions, JsonlReader, PlainTextReader, RecordReader};
pub use output::CsvAppender;
