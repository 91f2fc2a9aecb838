//! jobsift LLM Provider Layer
//!
//! Structured-output LLM clients behind the `LlmProvider` trait from
//! `jobsift-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//! - `OllamaProvider`: Local Ollama API integration
//!
//! Providers make exactly one request per call. Retrying is the extractor's
//! business.
//!
//! # Examples
//!
//! ```
//! use jobsift_llm::MockProvider;
//! use jobsift_domain::traits::LlmProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new(r#"{"ok": true}"#);
//! let result = provider.generate_structured("prompt", &serde_json::json!({})).await.unwrap();
//! assert_eq!(result, r#"{"ok": true}"#);
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod mock;
pub mod ollama;

use thiserror::Error;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether a later attempt can reasonably succeed
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            LlmError::ModelNotAvailable(_) | LlmError::Authentication(_)
        )
    }
}

/// A model offered by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Identifier to put in configuration
    pub name: String,

    /// Human readable name, when the provider has one
    pub display_name: Option<String>,
}

/// Map a non-success HTTP status to an `LlmError`
pub(crate) fn status_error(status: reqwest::StatusCode, model: &str, body: String) -> LlmError {
    match status.as_u16() {
        429 => LlmError::RateLimitExceeded,
        404 => LlmError::ModelNotAvailable(model.to_string()),
        401 | 403 => LlmError::Authentication(format!("HTTP {}", status)),
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "m", String::new()),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "m", String::new()),
            LlmError::ModelNotAvailable(ref m) if m == "m"
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "m", String::new()),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "m", "down".to_string()),
            LlmError::Communication(ref msg) if msg.contains("down")
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(LlmError::RateLimitExceeded.is_transient());
        assert!(LlmError::InvalidResponse("x".into()).is_transient());
        assert!(!LlmError::ModelNotAvailable("x".into()).is_transient());
        assert!(!LlmError::Authentication("x".into()).is_transient());
    }
}
