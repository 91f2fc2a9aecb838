//! Archive manager - relocating a fully drained input file
//!
//! Destination: `<archive_dir>/processed_<stem>_<YYYY-MM-DD_HH-MM>.<ext>`.
//! An existing archive is never overwritten; a `-1`, `-2`, ... suffix is
//! added instead.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Local};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Timestamp format embedded in archive names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Moves consumed input files into the archive directory
#[derive(Debug, Clone)]
pub struct ArchiveManager {
    archive_dir: PathBuf,
}

impl ArchiveManager {
    /// Archive into `archive_dir` (created on first use)
    pub fn new(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
        }
    }

    /// Directory archives are written to
    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Archive `input` with the current local time
    pub fn archive(&self, input: &Path) -> Result<PathBuf> {
        self.archive_at(input, Local::now())
    }

    /// Archive `input` stamped with `at`
    pub fn archive_at(&self, input: &Path, at: DateTime<Local>) -> Result<PathBuf> {
        if !input.is_file() {
            return Err(StoreError::Archive(format!(
                "{} is not a file",
                input.display()
            )));
        }

        fs::create_dir_all(&self.archive_dir).map_err(|e| {
            StoreError::Archive(format!(
                "cannot create {}: {}",
                self.archive_dir.display(),
                e
            ))
        })?;

        let destination = self.destination_for(input, at);
        move_file(input, &destination)?;

        tracing::info!(
            from = %input.display(),
            to = %destination.display(),
            "Archived drained input"
        );
        Ok(destination)
    }

    /// First free archive path for `input` at time `at`
    pub fn destination_for(&self, input: &Path, at: DateTime<Local>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".to_string());
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "jsonl".to_string());
        let base = format!("processed_{}_{}", stem, at.format(TIMESTAMP_FORMAT));

        let mut candidate = self.archive_dir.join(format!("{}.{}", base, ext));
        let mut suffix = 1;
        while candidate.exists() {
            candidate = self.archive_dir.join(format!("{}-{}.{}", base, suffix, ext));
            suffix += 1;
        }
        candidate
    }
}

/// Rename, falling back to copy + remove across filesystems
///
/// The source is removed only after the copy succeeded.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) if rename_err.kind() == ErrorKind::CrossesDevices => {
            fs::copy(from, to).map_err(|e| {
                StoreError::Archive(format!(
                    "failed to copy {} to {}: {}",
                    from.display(),
                    to.display(),
                    e
                ))
            })?;
            fs::remove_file(from).map_err(|e| {
                StoreError::Archive(format!("failed to remove {}: {}", from.display(), e))
            })
        }
        Err(e) => Err(StoreError::Archive(format!(
            "failed to move {} to {}: {}",
            from.display(),
            to.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_destination_name() {
        let manager = ArchiveManager::new("/tmp/archive-root-that-does-not-exist");
        let dest = manager.destination_for(Path::new("data/queue/jobs.jsonl"), at());
        assert_eq!(
            dest,
            PathBuf::from("/tmp/archive-root-that-does-not-exist/processed_jobs_2026-03-14_09-05.jsonl")
        );
    }

    #[test]
    fn test_destination_defaults_extension() {
        let manager = ArchiveManager::new("arch");
        let dest = manager.destination_for(Path::new("queue"), at());
        assert_eq!(dest, PathBuf::from("arch/processed_queue_2026-03-14_09-05.jsonl"));
    }

    #[test]
    fn test_archive_moves_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("jobs.jsonl");
        fs::write(&input, "{\"id\": \"a\"}\n").unwrap();

        let manager = ArchiveManager::new(dir.path().join("archive"));
        let dest = manager.archive_at(&input, at()).unwrap();

        assert!(!input.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "{\"id\": \"a\"}\n");
    }

    #[test]
    fn test_archive_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let manager = ArchiveManager::new(dir.path().join("archive"));

        let input = dir.path().join("jobs.jsonl");
        fs::write(&input, "first").unwrap();
        let first = manager.archive_at(&input, at()).unwrap();

        fs::write(&input, "second").unwrap();
        let second = manager.archive_at(&input, at()).unwrap();

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("09-05-1.jsonl"));
        assert_eq!(fs::read_to_string(first).unwrap(), "first");
        assert_eq!(fs::read_to_string(second).unwrap(), "second");
    }

    #[test]
    fn test_archive_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        let manager = ArchiveManager::new(dir.path().join("archive"));
        let result = manager.archive(&dir.path().join("gone.jsonl"));
        assert!(matches!(result, Err(StoreError::Archive(_))));
    }
}
