//! Configuration for the Extractor

use crate::retry::RetryPolicy;
use jobsift_domain::AnalysisVariant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Extraction schema to request
    pub variant: AnalysisVariant,

    /// Descriptions longer than this (characters) are truncated before prompting
    pub max_description_chars: usize,

    /// Maximum time for a single extraction call (seconds)
    pub request_timeout_secs: u64,

    /// Attempts per record, including the first
    pub max_attempts: u32,

    /// Delay before the first retry (seconds)
    pub base_delay_secs: u64,

    /// Upper bound on any retry delay (seconds)
    pub max_delay_secs: u64,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff policy described by this configuration
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_secs(self.base_delay_secs),
            Duration::from_secs(self.max_delay_secs),
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_description_chars == 0 {
            return Err("max_description_chars must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.base_delay_secs > self.max_delay_secs {
            return Err("base_delay_secs cannot exceed max_delay_secs".to_string());
        }
        self.retry_policy().validate()
    }
}

impl Default for ExtractorConfig {
    /// Complex variant, 3 attempts with 4 s / 8 s backoff
    fn default() -> Self {
        Self {
            variant: AnalysisVariant::Complex,
            max_description_chars: 20_000,
            request_timeout_secs: 60,
            max_attempts: 3,
            base_delay_secs: 4,
            max_delay_secs: 10,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: fail fast, for quick trial runs
    pub fn aggressive() -> Self {
        Self {
            variant: AnalysisVariant::Simple,
            max_description_chars: 8_000,
            request_timeout_secs: 20,
            max_attempts: 1,
            base_delay_secs: 1,
            max_delay_secs: 1,
        }
    }

    /// Lenient preset: longer timeouts and more attempts for flaky or slow services
    pub fn lenient() -> Self {
        Self {
            variant: AnalysisVariant::Complex,
            max_description_chars: 50_000,
            request_timeout_secs: 180,
            max_attempts: 5,
            base_delay_secs: 4,
            max_delay_secs: 60,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_attempts() {
        let config = ExtractorConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_delays() {
        let config = ExtractorConfig {
            base_delay_secs: 30,
            max_delay_secs: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capped_backoff_that_stops_growing_is_rejected() {
        let config = ExtractorConfig {
            max_attempts: 4,
            base_delay_secs: 5,
            max_delay_secs: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractorConfig {
            max_attempts: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = ExtractorConfig::default().retry_policy();
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("variant = \"complex\""));
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("variant = \"simple\"\nmax_attempts = 2\n").unwrap();
        assert_eq!(parsed.variant, AnalysisVariant::Simple);
        assert_eq!(parsed.max_attempts, 2);
        assert_eq!(parsed.request_timeout_secs, 60);
    }
}
