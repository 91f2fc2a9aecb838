//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use jobsift_domain::AnalysisVariant;
use std::path::PathBuf;

/// jobsift - turn collected job postings into a structured market dataset.
#[derive(Debug, Parser)]
#[command(name = "jobsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "JOBSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract pending postings into the output store
    Run(RunArgs),

    /// Show paths, known ids and pending records
    Status,

    /// Count the most frequent technologies in the output store
    Report(ReportArgs),

    /// List the models offered by the configured provider
    Models,
}

/// Arguments for the run command.
#[derive(Debug, Default, Parser)]
pub struct RunArgs {
    /// Input file (overrides [paths] input)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV (overrides [paths] output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Standing queue consulted for already handled ids
    #[arg(short, long)]
    pub queue: Option<PathBuf>,

    /// Stop after this many records were sent for extraction; omit to drain and archive
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Extraction schema
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Extraction provider
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderKind>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Values shown per field
    #[arg(short, long, default_value = "10")]
    pub top: usize,

    /// Only report this field (repeatable)
    #[arg(short, long)]
    pub field: Vec<String>,
}

/// Extraction provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini structured output
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Gemini => f.write_str("gemini"),
            ProviderKind::Ollama => f.write_str("ollama"),
        }
    }
}

/// Variant argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VariantArg {
    /// Core technology fields
    Simple,
    /// Core fields plus domain knowledge and structured salary
    Complex,
}

impl From<VariantArg> for AnalysisVariant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Simple => AnalysisVariant::Simple,
            VariantArg::Complex => AnalysisVariant::Complex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from([
            "jobsift",
            "run",
            "--limit",
            "25",
            "--variant",
            "simple",
            "--provider",
            "ollama",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.limit, Some(25));
                assert!(matches!(args.variant, Some(VariantArg::Simple)));
                assert_eq!(args.provider, Some(ProviderKind::Ollama));
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["jobsift", "status", "--no-color", "-c", "custom.toml"]);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_report_fields() {
        let cli = Cli::parse_from(["jobsift", "report", "--top", "5", "-f", "tools", "-f", "languages"]);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.top, 5);
                assert_eq!(args.field, vec!["tools", "languages"]);
            }
            other => panic!("Expected Report command, got {:?}", other),
        }
    }

    #[test]
    fn test_variant_conversion() {
        let variant: AnalysisVariant = VariantArg::Complex.into();
        assert_eq!(variant, AnalysisVariant::Complex);
    }
}
