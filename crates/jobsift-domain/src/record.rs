//! Record module - raw postings as handed over by the collector

use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally assigned identifier of a record
///
/// The collector owns id assignment; jobsift only compares ids for equality.
/// Surrounding whitespace is not significant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId, trimming surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use jobsift_domain::RecordId;
    ///
    /// let id = RecordId::new(" 5f1c2a ");
    /// assert_eq!(id.as_str(), "5f1c2a");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() == value.len() {
            Self(value)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id carries no characters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// One job posting produced by the external collector
///
/// Immutable once read. `description` is large and is never persisted;
/// it only feeds the extraction prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Unique, externally assigned identifier
    pub id: RecordId,

    /// Posting title as shown by the source
    #[serde(default)]
    pub title: String,

    /// Hiring company
    #[serde(default)]
    pub company: String,

    /// Location string as shown by the source
    #[serde(default)]
    pub location: String,

    /// Full free-text description
    #[serde(default)]
    pub description: String,
}

impl RawRecord {
    /// Text submitted to the extraction service: title header, blank line, description
    pub fn extraction_text(&self) -> String {
        format!("JOB TITLE: {}\n\n{}", self.title, self.description)
    }
}
