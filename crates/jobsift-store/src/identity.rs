//! Identity sources - scanning stores for already handled ids
//!
//! Both sources treat a missing (or empty) file as "no ids" and skip lines
//! they cannot parse.

use crate::error::{Result, StoreError};
use crate::input::JsonlReader;
use jobsift_domain::traits::IdentitySource;
use jobsift_domain::RecordId;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Open `path` for id scanning; `None` when there is nothing to scan
fn open_existing(path: &Path) -> Result<Option<File>> {
    match File::open(path) {
        Ok(file) => {
            if file.metadata()?.len() == 0 {
                Ok(None)
            } else {
                Ok(Some(file))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e)),
    }
}

/// Ids from the first column of the output CSV, header skipped
#[derive(Debug, Clone)]
pub struct CsvIdentitySource {
    path: PathBuf,
}

impl CsvIdentitySource {
    /// Scan the CSV at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IdentitySource for CsvIdentitySource {
    type Error = StoreError;

    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_ids(&self) -> Result<Vec<RecordId>> {
        let Some(file) = open_existing(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "Output store does not exist yet");
            return Ok(Vec::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut ids = Vec::new();
        for (index, row) in reader.records().enumerate() {
            match row {
                Ok(row) => {
                    if let Some(id) = row.get(0).map(RecordId::new).filter(|id| !id.is_empty()) {
                        ids.push(id);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        row = index + 2,
                        error = %e,
                        "Skipping unreadable output row"
                    );
                }
            }
        }
        Ok(ids)
    }
}

/// Ids from the `id` field of a JSONL queue
#[derive(Debug, Clone)]
pub struct JsonlIdentitySource {
    path: PathBuf,
}

impl JsonlIdentitySource {
    /// Scan the JSONL file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IdentitySource for JsonlIdentitySource {
    type Error = StoreError;

    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_ids(&self) -> Result<Vec<RecordId>> {
        let Some(file) = open_existing(&self.path)? else {
            return Ok(Vec::new());
        };

        let mut ids = Vec::new();
        for item in JsonlReader::new(file) {
            match item {
                Ok(record) => ids.push(record.id),
                Err(StoreError::MalformedInput { line, reason }) => {
                    tracing::warn!(path = %self.path.display(), line, %reason, "Skipping malformed queue line");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(ids)
    }
}

/// Either kind of identity source, chosen by file extension
#[derive(Debug, Clone)]
pub enum IdentityFile {
    /// A `.csv` output store
    Csv(CsvIdentitySource),
    /// Anything else is read as JSONL
    Jsonl(JsonlIdentitySource),
}

impl IdentityFile {
    /// Pick the scanner for `path` from its extension
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            IdentityFile::Csv(CsvIdentitySource::new(path))
        } else {
            IdentityFile::Jsonl(JsonlIdentitySource::new(path))
        }
    }
}

impl IdentitySource for IdentityFile {
    type Error = StoreError;

    fn name(&self) -> String {
        match self {
            IdentityFile::Csv(source) => source.name(),
            IdentityFile::Jsonl(source) => source.name(),
        }
    }

    fn load_ids(&self) -> Result<Vec<RecordId>> {
        match self {
            IdentityFile::Csv(source) => source.load_ids(),
            IdentityFile::Jsonl(source) => source.load_ids(),
        }
    }
}
