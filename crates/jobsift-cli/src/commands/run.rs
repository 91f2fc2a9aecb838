//! Run command implementation.

use crate::cli::{ProviderKind, RunArgs};
use crate::commands::{gemini_provider, ollama_provider};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jobsift_domain::{LlmProvider, OutputRow, RecordId};
use jobsift_extractor::{Extractor, ExtractorConfig};
use jobsift_pipeline::{Pipeline, PipelineConfig, RunObserver, RunSummary};

/// Execute the run command.
pub async fn execute_run(args: RunArgs, mut config: Config, formatter: &Formatter) -> Result<()> {
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput(
            "--limit must be greater than 0; omit it to process the whole input".to_string(),
        ));
    }

    config.apply_run_args(&args);
    config.validate()?;

    let pipeline_config = config.pipeline_config(args.limit);
    let extractor_config = config.extraction.extractor.clone();
    let show_rows = config.settings.show_rows;

    // Provider construction checks credentials before any input is read.
    let summary = match config.extraction.provider {
        ProviderKind::Gemini => {
            let provider = gemini_provider(&config)?;
            drive(provider, extractor_config, pipeline_config, show_rows, formatter).await?
        }
        ProviderKind::Ollama => {
            let provider = ollama_provider(&config)?;
            drive(provider, extractor_config, pipeline_config, show_rows, formatter).await?
        }
    };

    println!("{}", formatter.format_summary(&summary));
    if summary.total_failed() > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} record(s) were not stored and will be retried on the next run",
                summary.total_failed()
            ))
        );
    }

    Ok(())
}

async fn drive<L: LlmProvider>(
    provider: L,
    extractor_config: ExtractorConfig,
    pipeline_config: PipelineConfig,
    show_rows: bool,
    formatter: &Formatter,
) -> Result<RunSummary> {
    let pipeline = Pipeline::new(pipeline_config, Extractor::new(provider, extractor_config));
    let mut printer = RowPrinter {
        formatter,
        show_rows,
    };
    Ok(pipeline.run_until(shutdown_signal(), &mut printer).await?)
}

/// Completes on the first Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl+C; run will not be interruptible");
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl+C received, stopping");
}

struct RowPrinter<'a> {
    formatter: &'a Formatter,
    show_rows: bool,
}

impl RunObserver for RowPrinter<'_> {
    fn on_row(&mut self, row: &OutputRow) {
        if self.show_rows {
            println!("{}", self.formatter.format_row(row));
        }
    }

    fn on_failure(&mut self, id: &RecordId, error: &str) {
        if self.show_rows {
            eprintln!("{}", self.formatter.error(&format!("{}: {}", id, error)));
        }
    }
}
