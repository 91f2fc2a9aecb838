//! Command implementations.

pub mod models;
pub mod report;
pub mod run;
pub mod status;

pub use self::models::execute_models;
pub use self::report::execute_report;
pub use self::run::execute_run;
pub use self::status::execute_status;

use crate::config::Config;
use crate::error::Result;
use jobsift_llm::{gemini, ollama, GeminiProvider, OllamaProvider};

/// Gemini client for the configured model; needs the API key.
pub(crate) fn gemini_provider(config: &Config) -> Result<GeminiProvider> {
    let api_key = Config::api_key()?;
    let base_url = config
        .extraction
        .endpoint
        .clone()
        .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string());
    Ok(GeminiProvider::with_options(
        base_url,
        api_key,
        config.extraction.model.clone(),
        config.extraction.extractor.request_timeout(),
    )?)
}

/// Ollama client for the configured model.
pub(crate) fn ollama_provider(config: &Config) -> Result<OllamaProvider> {
    let endpoint = config
        .extraction
        .endpoint
        .clone()
        .unwrap_or_else(|| ollama::DEFAULT_ENDPOINT.to_string());
    Ok(OllamaProvider::with_timeout(
        endpoint,
        config.extraction.model.clone(),
        config.extraction.extractor.request_timeout(),
    )?)
}
