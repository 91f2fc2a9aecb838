//! Models command implementation.

use crate::cli::ProviderKind;
use crate::commands::{gemini_provider, ollama_provider};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the models command.
pub async fn execute_models(config: &Config, formatter: &Formatter) -> Result<()> {
    let provider = config.extraction.provider;
    let models = match provider {
        ProviderKind::Gemini => gemini_provider(config)?.list_models().await?,
        ProviderKind::Ollama => ollama_provider(config)?.list_models().await?,
    };

    println!(
        "{}",
        formatter.info(&format!("{} model(s) from {}", models.len(), provider))
    );
    println!("{}", formatter.format_models(&models));
    Ok(())
}
