//! Input readers for the collector's output
//!
//! Both readers yield `Result<RawRecord>` items so the caller decides what a
//! bad line means. The pipeline skips and logs `MalformedInput`.

use crate::error::{Result, StoreError};
use jobsift_domain::{RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Default chunk delimiter for plain-text input
pub const DEFAULT_DELIMITER: &str = "\n---\n";

/// Default minimum chunk length; shorter chunks are noise
pub const DEFAULT_MIN_CHUNK_CHARS: usize = 100;

/// Encoding of the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
    /// One text blob split by a delimiter
    Plain,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Jsonl => f.write_str("jsonl"),
            InputFormat::Plain => f.write_str("plain"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jsonl" | "json" => Ok(InputFormat::Jsonl),
            "plain" | "text" | "txt" => Ok(InputFormat::Plain),
            other => Err(format!("Invalid input format: {}", other)),
        }
    }
}

/// How to read the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Encoding of the file
    pub format: InputFormat,

    /// Chunk delimiter (plain format only)
    pub delimiter: String,

    /// Chunks with fewer characters are dropped (plain format only)
    pub min_chunk_chars: usize,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            format: InputFormat::Jsonl,
            delimiter: DEFAULT_DELIMITER.to_string(),
            min_chunk_chars: DEFAULT_MIN_CHUNK_CHARS,
        }
    }
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io(e),
    })
}

/// Lazy reader over a JSONL file, one `RawRecord` per line
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub struct JsonlReader<R> {
    lines: io::Lines<BufReader<R>>,
    line: usize,
    failed: bool,
}

impl JsonlReader<File> {
    /// Open `path`; fails with `NotFound` if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(open_input(path.as_ref())?))
    }
}

impl<R: Read> JsonlReader<R> {
    /// Read records from any byte source
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            line: 0,
            failed: false,
        }
    }
}

impl<R: Read> Iterator for JsonlReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let next = self.lines.next()?;
            self.line += 1;

            let text = match next {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Some(Err(StoreError::MalformedInput {
                        line: self.line,
                        reason: "line is not valid UTF-8".to_string(),
                    }));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(StoreError::Io(e)));
                }
            };

            let trimmed = text.trim_start_matches('\u{feff}').trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(parse_line(trimmed, self.line));
        }
    }
}

fn parse_line(text: &str, line: usize) -> Result<RawRecord> {
    let record: RawRecord =
        serde_json::from_str(text).map_err(|e| StoreError::MalformedInput {
            line,
            reason: e.to_string(),
        })?;

    if record.id.is_empty() {
        return Err(StoreError::MalformedInput {
            line,
            reason: "record has an empty id".to_string(),
        });
    }
    Ok(record)
}

/// Reader for the legacy plain-text format
///
/// The whole file is one blob; each delimiter-separated chunk is one record.
/// Ids are derived from the chunk text so reruns see the same ids.
pub struct PlainTextReader {
    records: std::vec::IntoIter<RawRecord>,
}

impl PlainTextReader {
    /// Read and split `path`; fails with `NotFound` if it does not exist
    pub fn open(path: impl AsRef<Path>, delimiter: &str, min_chunk_chars: usize) -> Result<Self> {
        let mut text = String::new();
        open_input(path.as_ref())?.read_to_string(&mut text)?;
        Ok(Self::from_text(&text, delimiter, min_chunk_chars))
    }

    /// Split an in-memory blob
    pub fn from_text(text: &str, delimiter: &str, min_chunk_chars: usize) -> Self {
        let chunks: Vec<&str> = if delimiter.is_empty() {
            vec![text]
        } else {
            text.split(delimiter).collect()
        };

        let records: Vec<RawRecord> = chunks
            .into_iter()
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty() && chunk.chars().count() >= min_chunk_chars)
            .map(chunk_record)
            .collect();

        Self {
            records: records.into_iter(),
        }
    }
}

impl Iterator for PlainTextReader {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(Ok)
    }
}

/// First 16 hex characters of the chunk's SHA-256
pub fn chunk_id(chunk: &str) -> RecordId {
    let digest = format!("{:x}", Sha256::digest(chunk.as_bytes()));
    RecordId::new(&digest[..16])
}

fn chunk_record(chunk: &str) -> RawRecord {
    let title = chunk
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string();

    RawRecord {
        id: chunk_id(chunk),
        title,
        company: String::new(),
        location: String::new(),
        description: chunk.to_string(),
    }
}

/// Reader over either input format
pub enum RecordReader {
    /// JSONL input
    Jsonl(JsonlReader<File>),
    /// Delimited plain-text input
    Plain(PlainTextReader),
}

impl RecordReader {
    /// Open `path` in the configured format
    pub fn open(path: impl AsRef<Path>, options: &InputOptions) -> Result<Self> {
        match options.format {
            InputFormat::Jsonl => Ok(RecordReader::Jsonl(JsonlReader::open(path)?)),
            InputFormat::Plain => Ok(RecordReader::Plain(PlainTextReader::open(
                path,
                &options.delimiter,
                options.min_chunk_chars,
            )?)),
        }
    }
}

impl Iterator for RecordReader {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordReader::Jsonl(reader) => reader.next(),
            RecordReader::Plain(reader) => reader.next(),
        }
    }
}
