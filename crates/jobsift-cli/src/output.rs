//! Output formatting for the CLI.

use colored::*;
use jobsift_domain::OutputRow;
use jobsift_llm::ModelInfo;
use jobsift_pipeline::{QueueStatus, RunSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Run summary as a two-column table.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let archived = summary
            .archived
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no".to_string());

        let mut builder = Builder::default();
        builder.push_record(["Run", "Value"]);
        builder.push_record(["Stopped".to_string(), summary.stopped_by.to_string()]);
        builder.push_record(["Seen".to_string(), summary.seen.to_string()]);
        builder.push_record(["Already processed".to_string(), summary.skipped_duplicate.to_string()]);
        builder.push_record(["Processed".to_string(), summary.processed.to_string()]);
        builder.push_record(["Failed".to_string(), summary.failed.to_string()]);
        if summary.unpersisted > 0 {
            builder.push_record(["Not persisted".to_string(), summary.unpersisted.to_string()]);
        }
        if summary.malformed > 0 {
            builder.push_record(["Malformed lines".to_string(), summary.malformed.to_string()]);
        }
        builder.push_record(["Archived".to_string(), archived]);

        self.finish(builder)
    }

    /// Queue status with the paths it was computed from.
    pub fn format_status(&self, paths: &[(&str, String)], status: &QueueStatus) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Item", "Value"]);
        for (label, value) in paths {
            builder.push_record([label.to_string(), value.clone()]);
        }
        builder.push_record(["Known ids".to_string(), status.known_ids.to_string()]);
        if status.input_exists {
            builder.push_record(["Input records".to_string(), status.input_records.to_string()]);
            builder.push_record(["Pending".to_string(), status.pending.to_string()]);
            if status.malformed > 0 {
                builder.push_record(["Malformed lines".to_string(), status.malformed.to_string()]);
            }
        } else {
            builder.push_record(["Input records".to_string(), "input missing".to_string()]);
        }

        self.finish(builder)
    }

    /// Top values of one output field.
    pub fn format_counts(&self, field: &str, counts: &[(String, usize)]) -> String {
        if counts.is_empty() {
            return self.warning(&format!("No values for {}", field));
        }

        let mut builder = Builder::default();
        builder.push_record([field.to_string(), "Count".to_string()]);
        for (value, count) in counts {
            builder.push_record([value.clone(), count.to_string()]);
        }

        self.finish(builder)
    }

    /// Available models.
    pub fn format_models(&self, models: &[ModelInfo]) -> String {
        if models.is_empty() {
            return self.warning("No models found.");
        }

        let mut builder = Builder::default();
        builder.push_record(["Model", "Name"]);
        for model in models {
            builder.push_record([
                model.name.clone(),
                model.display_name.clone().unwrap_or_default(),
            ]);
        }

        self.finish(builder)
    }

    /// One committed row on a single line.
    pub fn format_row(&self, row: &OutputRow) -> String {
        let mut line = format!("{} {}", row.id(), row.cell("title"));
        let company = row.cell("company");
        if !company.is_empty() {
            line.push_str(&format!(" @ {}", company));
        }
        let languages = row.cell("languages");
        if !languages.is_empty() {
            line.push_str(&format!(" [{}]", languages));
        }
        self.success(&line)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn finish(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
