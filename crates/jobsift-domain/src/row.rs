//! Output row - the flat record appended to the tabular store
//!
//! A row is the union of the raw record's pass-through fields and the
//! extracted fields. Extracted values win on name collisions, except that
//! `id`, `company` and `location` always come from the raw record when it
//! has a non-empty value for them.

use crate::{AnalysisVariant, ExtractedFields, RawRecord};
use serde_json::{Map, Value};

/// Raw-record columns that precede the extracted columns
pub const PASS_THROUGH_COLUMNS: &[&str] = &["id", "title", "company", "location"];

/// Separator used when a list value is rendered into one cell
pub const LIST_SEPARATOR: &str = "; ";

/// One output row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRow {
    values: Map<String, Value>,
}

impl OutputRow {
    /// Create a row from a field map
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Raw value of a column, if set
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// The row's id cell
    pub fn id(&self) -> String {
        self.cell("id")
    }

    /// Render a column into a single text cell
    ///
    /// Missing or null values render empty, lists are joined with
    /// [`LIST_SEPARATOR`] and nested objects are written as compact JSON.
    pub fn cell(&self, column: &str) -> String {
        self.values.get(column).map(render_cell).unwrap_or_default()
    }

    /// Render the given columns in order; columns the row lacks are empty
    pub fn cells(&self, columns: &[String]) -> Vec<String> {
        columns.iter().map(|c| self.cell(c)).collect()
    }

    /// Names of the columns this row carries
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Column order of the output for a given variant
///
/// Pass-through columns first, then the variant's fields not already listed.
pub fn output_columns(variant: AnalysisVariant) -> Vec<String> {
    let mut columns: Vec<String> = PASS_THROUGH_COLUMNS.iter().map(|c| c.to_string()).collect();
    for field in variant.field_names() {
        if !columns.iter().any(|c| c == field) {
            columns.push(field.to_string());
        }
    }
    columns
}

/// Merge a raw record and its extracted fields into an output row
///
/// Pure function. The description never reaches the row.
pub fn merge(raw: &RawRecord, extracted: &ExtractedFields) -> OutputRow {
    let mut values = Map::new();
    values.insert("id".into(), Value::String(raw.id.to_string()));
    values.insert("title".into(), Value::String(raw.title.clone()));
    values.insert("company".into(), Value::String(raw.company.clone()));
    values.insert("location".into(), Value::String(raw.location.clone()));

    for (key, value) in extracted.to_map() {
        values.insert(key, value);
    }

    let raw_wins = [
        ("id", raw.id.as_str()),
        ("company", raw.company.as_str()),
        ("location", raw.location.as_str()),
    ];
    for (key, value) in raw_wins {
        if !value.trim().is_empty() {
            values.insert(key.into(), Value::String(value.to_string()));
        }
    }

    values.remove("description");
    OutputRow { values }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_cell)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        Value::Object(_) => value.to_string(),
    }
}
