//! Mock provider for deterministic tests

use crate::LlmError;
use async_trait::async_trait;
use jobsift_domain::traits::LlmProvider;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock LLM provider for deterministic testing
///
/// Replies come from, in order of precedence: the scripted queue (one entry
/// consumed per call), a prompt-specific response, the default response.
/// No network calls are made.
///
/// # Examples
///
/// ```
/// use jobsift_llm::{LlmError, MockProvider};
/// use jobsift_domain::traits::LlmProvider;
///
/// # tokio_test::block_on(async {
/// let provider = MockProvider::new("{}");
/// provider.push_error(LlmError::RateLimitExceeded);
///
/// let schema = serde_json::json!({});
/// assert!(provider.generate_structured("p", &schema).await.is_err());
/// assert_eq!(provider.generate_structured("p", &schema).await.unwrap(), "{}");
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Wait this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for prompts containing `needle`
    pub fn add_response(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(needle.into(), response.into());
    }

    /// Queue a successful reply for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, error: LlmError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return scripted;
        }

        let responses = self.responses.lock().unwrap();
        if let Some((_, response)) = responses.iter().find(|(needle, _)| prompt.contains(needle.as_str())) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn is_retryable(error: &Self::Error) -> bool {
        error.is_transient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", &json!({})).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let provider = MockProvider::default();
        provider.add_response("JOB TITLE: Rust", r#"{"a": 1}"#);

        let schema = json!({});
        assert_eq!(
            provider.generate_structured("JOB TITLE: Rust Dev", &schema).await.unwrap(),
            r#"{"a": 1}"#
        );
        assert_eq!(provider.generate_structured("other", &schema).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_mock_provider_script_order() {
        let provider = MockProvider::new("fallback");
        provider.push_error(LlmError::Communication("boom".into()));
        provider.push_response("second");

        let schema = json!({});
        assert!(provider.generate_structured("p", &schema).await.is_err());
        assert_eq!(provider.generate_structured("p", &schema).await.unwrap(), "second");
        assert_eq!(provider.generate_structured("p", &schema).await.unwrap(), "fallback");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("prompt1", &json!({})).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.prompts(), vec!["prompt1".to_string()]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_history() {
        let provider = MockProvider::default();
        let clone = provider.clone();
        clone.generate_structured("p", &json!({})).await.unwrap();
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(MockProvider::is_retryable(&LlmError::RateLimitExceeded));
        assert!(!MockProvider::is_retryable(&LlmError::ModelNotAvailable("m".into())));
    }
}
