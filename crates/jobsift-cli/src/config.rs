//! Configuration management for the CLI.
//!
//! Lookup order: `--config`, `./jobsift.toml`, `~/.jobsift/config.toml`.
//! A missing file means defaults. Credentials never live here.

use crate::cli::{ProviderKind, RunArgs};
use crate::error::{CliError, Result};
use jobsift_extractor::ExtractorConfig;
use jobsift_llm::gemini::DEFAULT_MODEL;
use jobsift_pipeline::PipelineConfig;
use jobsift_store::InputOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "jobsift.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input, output, queue and archive locations
    #[serde(default)]
    pub paths: Paths,

    /// Provider, model and extraction tuning
    #[serde(default)]
    pub extraction: Extraction,

    /// Input encoding
    #[serde(default)]
    pub input: InputOptions,

    /// Terminal output
    #[serde(default)]
    pub settings: Settings,
}

/// `[paths]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Collector output to ingest
    pub input: PathBuf,
    /// Append-only CSV store
    pub output: PathBuf,
    /// Standing queue consulted for dedup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<PathBuf>,
    /// Where drained inputs are moved
    pub archive_dir: PathBuf,
}

/// `[extraction]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extraction {
    /// Which service performs the extraction
    pub provider: ProviderKind,
    /// Model name
    pub model: String,
    /// Base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Variant, timeout, retry and truncation settings
    #[serde(flatten)]
    pub extractor: ExtractorConfig,
}

/// `[settings]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,
    /// Print each row as it is committed
    pub show_rows: bool,
}

impl Config {
    /// Per-user configuration path.
    pub fn user_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".jobsift").join("config.toml"))
    }

    /// First existing configuration file, honoring an explicit path.
    ///
    /// An explicit path that does not exist is an error rather than a
    /// silent fallback to defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(CliError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Ok(Some(local));
        }

        match Self::user_path() {
            Ok(path) if path.is_file() => Ok(Some(path)),
            _ => Ok(None),
        }
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit)? {
            Some(path) => {
                let contents = fs::read_to_string(&path)?;
                let config = Self::from_toml(&contents)?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply `run` flags on top of the file values.
    pub fn apply_run_args(&mut self, args: &RunArgs) {
        if let Some(input) = &args.input {
            self.paths.input = input.clone();
        }
        if let Some(output) = &args.output {
            self.paths.output = output.clone();
        }
        if let Some(queue) = &args.queue {
            self.paths.queue = Some(queue.clone());
        }
        if let Some(variant) = args.variant {
            self.extraction.extractor.variant = variant.into();
        }
        if let Some(model) = &args.model {
            self.extraction.model = model.clone();
        }
        if let Some(provider) = args.provider {
            self.extraction.provider = provider;
        }
    }

    /// Pipeline settings for a run with the given limit.
    pub fn pipeline_config(&self, limit: Option<usize>) -> PipelineConfig {
        PipelineConfig {
            input: self.paths.input.clone(),
            output: self.paths.output.clone(),
            queue: self.paths.queue.clone(),
            archive_dir: self.paths.archive_dir.clone(),
            input_options: self.input.clone(),
            limit,
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.model.trim().is_empty() {
            return Err(CliError::Config("extraction.model must not be empty".into()));
        }
        self.extraction
            .extractor
            .validate()
            .map_err(CliError::Config)?;
        self.pipeline_config(None)
            .validate()
            .map_err(CliError::Config)?;
        Ok(())
    }

    /// The Gemini API key from the environment.
    pub fn api_key() -> Result<String> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CliError::Config(format!(
                "{} is not set (export it or put it in .env)",
                API_KEY_VAR
            ))),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            input: pipeline.input,
            output: pipeline.output,
            queue: pipeline.queue,
            archive_dir: pipeline.archive_dir,
        }
    }
}

impl Default for Extraction {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            show_rows: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::VariantArg;
    use jobsift_domain::AnalysisVariant;
    use jobsift_store::InputFormat;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.input, PathBuf::from("data/queue/jobs.jsonl"));
        assert_eq!(config.extraction.model, "gemini-2.5-flash-lite");
        assert_eq!(config.extraction.provider, ProviderKind::Gemini);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [paths]
            output = "out/jobs.csv"

            [extraction]
            provider = "ollama"
            model = "llama3.1"
            variant = "simple"
            max_attempts = 5

            [input]
            format = "plain"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.output, PathBuf::from("out/jobs.csv"));
        assert_eq!(config.paths.archive_dir, PathBuf::from("data/archive"));
        assert_eq!(config.extraction.provider, ProviderKind::Ollama);
        assert_eq!(config.extraction.extractor.variant, AnalysisVariant::Simple);
        assert_eq!(config.extraction.extractor.max_attempts, 5);
        assert_eq!(config.extraction.extractor.base_delay_secs, 4);
        assert_eq!(config.input.format, InputFormat::Plain);
        assert_eq!(config.input.min_chunk_chars, 100);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_run_args_override_file() {
        let mut config = Config::default();
        config.apply_run_args(&RunArgs {
            output: Some(PathBuf::from("elsewhere.csv")),
            variant: Some(VariantArg::Simple),
            model: Some("gemini-2.5-pro".into()),
            ..Default::default()
        });

        assert_eq!(config.paths.output, PathBuf::from("elsewhere.csv"));
        assert_eq!(config.extraction.model, "gemini-2.5-pro");
        assert_eq!(config.extraction.extractor.variant, AnalysisVariant::Simple);
        assert_eq!(config.paths.input, PathBuf::from("data/queue/jobs.jsonl"));
    }

    #[test]
    fn test_invalid_retry_settings_rejected() {
        let mut config = Config::default();
        config.extraction.extractor.max_attempts = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("jobsift.toml");
        fs::write(&path, "[settings]\nshow_rows = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.settings.show_rows);
        assert!(config.settings.color);
    }
}
