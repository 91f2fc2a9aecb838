//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_response;
use crate::prompt::PromptBuilder;
use crate::retry::RetryPolicy;
use crate::schema::extraction_schema;
use jobsift_domain::traits::LlmProvider;
use jobsift_domain::{AnalysisVariant, ExtractedFields, RawRecord};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The Extractor turns one raw record into validated extraction fields
///
/// Holds no state between calls beyond configuration: the provider, the
/// prompt builder and the schema for the configured variant.
pub struct Extractor<L: LlmProvider> {
    llm_provider: L,
    prompt_builder: PromptBuilder,
    schema: Value,
    variant: AnalysisVariant,
    retry: RetryPolicy,
    request_timeout: Duration,
}

impl<L: LlmProvider> Extractor<L> {
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            prompt_builder: PromptBuilder::new(config.variant, config.max_description_chars),
            schema: extraction_schema(config.variant),
            variant: config.variant,
            retry: config.retry_policy(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Replace the retry policy derived from the configuration
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the per-call timeout derived from the configuration
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Variant this extractor produces
    pub fn variant(&self) -> AnalysisVariant {
        self.variant
    }

    /// Model the provider talks to
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Schema sent with every request
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Extract fields for `record`, retrying transient failures
    ///
    /// Returns `ExtractionFailed` once the attempt cap is reached or a
    /// failure is permanent.
    pub async fn extract(&self, record: &RawRecord) -> Result<ExtractedFields, ExtractorError> {
        let prompt = self.prompt_builder.build(record);
        debug!(record_id = %record.id, prompt_chars = prompt.len(), "Built extraction prompt");

        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.attempt(&prompt).await {
                Ok(fields) => {
                    debug!(record_id = %record.id, attempt, "Extraction succeeded");
                    return Ok(fields);
                }
                Err(err) => err,
            };

            if !err.is_retryable() || attempt >= self.retry.max_attempts {
                return Err(ExtractorError::ExtractionFailed {
                    record_id: record.id.clone(),
                    attempts: attempt,
                    last_error: err.to_string(),
                });
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                record_id = %record.id,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Extraction attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One request with timeout, then validation
    async fn attempt(&self, prompt: &str) -> Result<ExtractedFields, ExtractorError> {
        let response = timeout(
            self.request_timeout,
            self.llm_provider.generate_structured(prompt, &self.schema),
        )
        .await
        .map_err(|_| ExtractorError::Timeout(self.request_timeout.as_millis() as u64))?
        .map_err(|e| ExtractorError::Llm {
            retryable: L::is_retryable(&e),
            message: e.to_string(),
        })?;

        debug!(response_chars = response.len(), "LLM response received");
        parse_response(&response, self.variant)
    }
}
