//! Append-only CSV output store
//!
//! The first write to a new (or empty) file emits the header. An existing
//! file keeps its own header: its columns become the declared column set,
//! so switching variants never misaligns old and new rows.

use crate::error::{Result, StoreError};
use jobsift_domain::row::output_columns;
use jobsift_domain::traits::RowSink;
use jobsift_domain::{AnalysisVariant, OutputRow};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// CSV implementation of `RowSink`
pub struct CsvAppender {
    path: PathBuf,
    columns: Vec<String>,
    writer: Option<csv::Writer<File>>,
    rows_written: usize,
}

impl CsvAppender {
    /// Appender for the columns of `variant`
    pub fn new(path: impl Into<PathBuf>, variant: AnalysisVariant) -> Self {
        Self::with_columns(path, output_columns(variant))
    }

    /// Appender with an explicit column order
    pub fn with_columns(path: impl Into<PathBuf>, columns: Vec<String>) -> Self {
        Self {
            path: path.into(),
            columns,
            writer: None,
            rows_written: 0,
        }
    }

    /// Path of the output store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Columns rows are written with
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows appended through this appender
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Create the parent directory and open the store
    ///
    /// Called before a run starts so an unwritable destination fails the run
    /// instead of every record.
    pub fn prepare(&mut self) -> Result<()> {
        self.writer().map(|_| ())
    }

    fn persistence(&self, action: &str, err: impl std::fmt::Display) -> StoreError {
        StoreError::Persistence(format!("{} {}: {}", action, self.path.display(), err))
    }

    fn writer(&mut self) -> Result<&mut csv::Writer<File>> {
        if self.writer.is_none() {
            let writer = self.open()?;
            self.writer = Some(writer);
        }
        self.writer
            .as_mut()
            .ok_or_else(|| StoreError::Persistence("writer unavailable".to_string()))
    }

    fn open(&mut self) -> Result<csv::Writer<File>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persistence("cannot create directory for", e))?;
        }

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if !needs_header {
            if let Some(existing) = self.read_header()? {
                if existing != self.columns {
                    tracing::debug!(
                        path = %self.path.display(),
                        "Output store has its own header; using its column order"
                    );
                    self.columns = existing;
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.persistence("cannot open", e))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer
                .write_record(&self.columns)
                .and_then(|_| writer.flush().map_err(csv::Error::from))
                .map_err(|e| self.persistence("cannot write header to", e))?;
            tracing::info!(path = %self.path.display(), "Created output store");
        }
        Ok(writer)
    }

    fn read_header(&self) -> Result<Option<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let header = reader.headers()?;
        if header.is_empty() {
            return Ok(None);
        }
        Ok(Some(header.iter().map(|c| c.trim().to_string()).collect()))
    }
}

impl RowSink for CsvAppender {
    type Error = StoreError;

    fn append(&mut self, row: &OutputRow) -> Result<()> {
        let cells = row.cells(&self.columns);
        let path = self.path.display().to_string();
        let writer = self.writer()?;

        let written = writer
            .write_record(&cells)
            .and_then(|_| writer.flush().map_err(csv::Error::from))
            .map_err(|e| StoreError::Persistence(format!("cannot append to {}: {}", path, e)))
            .and_then(|_| {
                writer
                    .get_ref()
                    .sync_data()
                    .map_err(|e| StoreError::Persistence(format!("cannot sync {}: {}", path, e)))
            });

        if let Err(e) = written {
            // A failed write can leave bytes buffered; reopen on the next append.
            self.writer = None;
            return Err(e);
        }

        self.rows_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn row(id: &str, languages: &[&str]) -> OutputRow {
        OutputRow::from_map(
            vec![
                ("id".to_string(), json!(id)),
                ("title".to_string(), json!("Dev, Backend")),
                ("languages".to_string(), json!(languages)),
                ("extra".to_string(), json!("dropped")),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn columns() -> Vec<String> {
        vec!["id".into(), "title".into(), "languages".into()]
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.csv");

        let mut appender = CsvAppender::with_columns(&path, columns());
        appender.append(&row("a", &["rust", "go"])).unwrap();
        appender.append(&row("b", &[])).unwrap();

        let mut again = CsvAppender::with_columns(&path, columns());
        again.append(&row("c", &["python"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "id,title,languages\na,\"Dev, Backend\",rust; go\nb,\"Dev, Backend\",\nc,\"Dev, Backend\",python\n"
        );
        assert_eq!(appender.rows_written(), 2);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "").unwrap();

        let mut appender = CsvAppender::with_columns(&path, columns());
        appender.append(&row("a", &[])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,title,languages\n"));
    }

    #[test]
    fn test_existing_header_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "id,languages\nold,java\n").unwrap();

        let mut appender = CsvAppender::with_columns(&path, columns());
        appender.append(&row("new", &["rust"])).unwrap();

        assert_eq!(appender.columns(), &["id".to_string(), "languages".to_string()]);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,languages\nold,java\nnew,rust\n");
    }

    #[test]
    fn test_prepare_creates_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/out.csv");
        let mut appender = CsvAppender::new(&path, AnalysisVariant::Simple);
        appender.prepare().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,title,company,location,languages"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_append_is_not_replayed_by_next_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let mut appender = CsvAppender::with_columns(&path, columns());
        appender.prepare().unwrap();

        let full = OpenOptions::new().write(true).open("/dev/full").unwrap();
        appender.writer = Some(csv::WriterBuilder::new().has_headers(false).from_writer(full));

        assert!(matches!(appender.append(&row("lost", &[])), Err(StoreError::Persistence(_))));
        assert!(appender.writer.is_none());

        appender.append(&row("kept", &["rust"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,title,languages\nkept,\"Dev, Backend\",rust\n");
        assert_eq!(appender.rows_written(), 1);
    }

    #[test]
    fn test_unwritable_destination_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let mut appender = CsvAppender::with_columns(blocker.join("out.csv"), columns());
        assert!(matches!(appender.prepare(), Err(StoreError::Persistence(_))));
    }
}
