//! Queue status - what the next run would see, without calling the extraction service

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::identity_sources;
use jobsift_domain::{derive_identity_set, IdentitySet};
use jobsift_store::{RecordReader, StoreError};

/// Snapshot of the input against the identity set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStatus {
    /// Distinct ids already in the output store or queue
    pub known_ids: usize,

    /// Whether the input file exists
    pub input_exists: bool,

    /// Valid records in the input
    pub input_records: usize,

    /// Distinct input ids not yet handled
    pub pending: usize,

    /// Input lines that could not be parsed
    pub malformed: usize,
}

/// Inspect the configured input and stores
///
/// A missing input is reported through `input_exists`, not as an error.
pub fn inspect(config: &PipelineConfig) -> Result<QueueStatus, PipelineError> {
    let known = derive_identity_set(&identity_sources(config))?;
    let mut status = QueueStatus {
        known_ids: known.len(),
        input_exists: config.input.is_file(),
        ..Default::default()
    };
    if !status.input_exists {
        return Ok(status);
    }

    let mut pending = IdentitySet::new();
    for item in RecordReader::open(&config.input, &config.input_options)? {
        match item {
            Ok(record) => {
                status.input_records += 1;
                if !known.contains(&record.id) {
                    pending.insert(record.id);
                }
            }
            Err(StoreError::MalformedInput { .. }) => status.malformed += 1,
            Err(e) => return Err(e.into()),
        }
    }
    status.pending = pending.len();
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> PipelineConfig {
        PipelineConfig {
            input: dir.path().join("jobs.jsonl"),
            output: dir.path().join("out.csv"),
            archive_dir: dir.path().join("archive"),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_input_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let status = inspect(&config_in(&dir)).unwrap();
        assert!(!status.input_exists);
        assert_eq!(status.pending, 0);
    }

    #[test]
    fn test_pending_excludes_known_and_repeated_ids() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.output, "id,title\na,Dev\n").unwrap();
        fs::write(
            &config.input,
            "{\"id\":\"a\"}\n{\"id\":\"b\"}\nnot json\n{\"id\":\"b\"}\n",
        )
        .unwrap();

        let status = inspect(&config).unwrap();
        assert_eq!(status.known_ids, 1);
        assert_eq!(status.input_records, 3);
        assert_eq!(status.pending, 1);
        assert_eq!(status.malformed, 1);
    }
}
