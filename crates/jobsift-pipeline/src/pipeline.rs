//! Pipeline - one sequential ingestion run
//!
//! ```text
//! IdentitySet ─┐
//! RecordReader ─┴─▶ dedup ─▶ throttle ─▶ Extractor ─▶ merge ─▶ CsvAppender ─▶ commit id
//!                                                                   │
//!                                   drained + exhaustive + clean ─▶ ArchiveManager
//! ```
//!
//! One record is in flight at a time, so output rows appear in input order
//! and the identity set always matches the durable store.

use crate::config::PipelineConfig;
use crate::context::RunContext;
use crate::error::PipelineError;
use crate::metrics::{RunSummary, StopReason};
use jobsift_domain::traits::{LlmProvider, RowSink};
use jobsift_domain::{derive_identity_set, merge, OutputRow, RecordId};
use jobsift_extractor::Extractor;
use jobsift_store::{
    ArchiveManager, CsvAppender, CsvIdentitySource, IdentityFile, RecordReader, StoreError,
};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error, info, warn};

/// Hooks for watching a run record by record
pub trait RunObserver {
    /// A row was appended to the output store
    fn on_row(&mut self, _row: &OutputRow) {}

    /// A record was attempted but not persisted
    fn on_failure(&mut self, _id: &RecordId, _error: &str) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Stores consulted for already handled ids: the output, then the queue
///
/// The output is always scanned as CSV; only the queue's format follows
/// its extension.
pub fn identity_sources(config: &PipelineConfig) -> Vec<IdentityFile> {
    let mut sources = vec![IdentityFile::Csv(CsvIdentitySource::new(&config.output))];
    if let Some(queue) = &config.queue {
        sources.push(IdentityFile::for_path(queue));
    }
    sources
}

/// Drives records from the input through extraction into the output store
pub struct Pipeline<L: LlmProvider> {
    config: PipelineConfig,
    extractor: Extractor<L>,
}

impl<L: LlmProvider> Pipeline<L> {
    /// Create a pipeline
    pub fn new(config: PipelineConfig, extractor: Extractor<L>) -> Self {
        Self { config, extractor }
    }

    /// Configuration of this pipeline
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run to completion without a shutdown signal
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        self.run_until(std::future::pending::<()>(), &mut NoopObserver)
            .await
    }

    /// Run until the input drains, the limit is reached or `shutdown` completes
    ///
    /// A shutdown that arrives while a record is being extracted abandons
    /// that record before anything is written for it. A cancelled run never
    /// archives.
    ///
    /// # Errors
    ///
    /// Only structural failures: missing input, unreadable identity sources,
    /// an unwritable output store, or an I/O error while reading the input.
    pub async fn run_until<F>(
        &self,
        shutdown: F,
        observer: &mut dyn RunObserver,
    ) -> Result<RunSummary, PipelineError>
    where
        F: Future<Output = ()>,
    {
        self.config.validate().map_err(PipelineError::Config)?;

        let reader = RecordReader::open(&self.config.input, &self.config.input_options)?;

        let identity = derive_identity_set(&identity_sources(&self.config))?;
        info!(
            input = %self.config.input.display(),
            known_ids = identity.len(),
            mode = ?self.config.run_mode(),
            model = self.extractor.model_name(),
            "Starting run"
        );

        let mut appender = CsvAppender::new(&self.config.output, self.extractor.variant());
        appender.prepare()?;

        let mut ctx = RunContext::new(identity, self.config.run_mode());
        let mut stop = StopReason::Drained;

        tokio::pin!(shutdown);

        for item in reader {
            if shutdown_requested(&mut shutdown).await {
                info!("Shutdown requested, stopping between records");
                stop = StopReason::Cancelled;
                break;
            }

            let record = match item {
                Ok(record) => record,
                Err(StoreError::MalformedInput { line, reason }) => {
                    warn!(line, %reason, "Skipping malformed input line");
                    ctx.summary_mut().malformed += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            ctx.summary_mut().seen += 1;

            if ctx.is_known(&record.id) {
                debug!(record_id = %record.id, "Already processed, skipping");
                ctx.summary_mut().skipped_duplicate += 1;
                continue;
            }

            ctx.submit();
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                result = self.extractor.extract(&record) => Some(result),
            };
            let Some(result) = outcome else {
                info!(record_id = %record.id, "Shutdown requested during extraction, record left unprocessed");
                stop = StopReason::Cancelled;
                break;
            };

            match result {
                Ok(fields) => {
                    let row = merge(&record, &fields);
                    match appender.append(&row) {
                        Ok(()) => {
                            ctx.commit(record.id.clone());
                            info!(
                                record_id = %record.id,
                                processed = ctx.summary().processed,
                                "Record extracted"
                            );
                            observer.on_row(&row);
                        }
                        Err(e) => {
                            error!(record_id = %record.id, error = %e, "Could not persist row, record stays unprocessed");
                            ctx.summary_mut().unpersisted += 1;
                            observer.on_failure(&record.id, &e.to_string());
                        }
                    }
                }
                Err(e) => {
                    error!(record_id = %record.id, error = %e, "Extraction failed, record stays unprocessed");
                    ctx.summary_mut().failed += 1;
                    observer.on_failure(&record.id, &e.to_string());
                }
            }

            // Failed submissions count against the limit.
            if ctx.throttle().should_stop() {
                info!(limit = ?self.config.limit, "Run limit reached");
                stop = StopReason::LimitReached;
                break;
            }
        }

        ctx.summary_mut().stopped_by = stop;

        if stop == StopReason::Drained && ctx.throttle().should_archive() {
            if ctx.summary().total_failed() > 0 {
                warn!(
                    failed = ctx.summary().total_failed(),
                    input = %self.config.input.display(),
                    "Input kept in place so failed records are retried next run"
                );
            } else {
                match ArchiveManager::new(&self.config.archive_dir).archive(&self.config.input) {
                    Ok(destination) => ctx.summary_mut().archived = Some(destination),
                    Err(e) => error!(error = %e, "Archiving failed; processed rows are kept"),
                }
            }
        }

        let summary = ctx.into_summary();
        info!(
            seen = summary.seen,
            processed = summary.processed,
            skipped = summary.skipped_duplicate,
            failed = summary.total_failed(),
            malformed = summary.malformed,
            stopped_by = %summary.stopped_by,
            "Run finished"
        );
        Ok(summary)
    }
}

/// Poll `shutdown` once without waiting
async fn shutdown_requested<F: Future<Output = ()>>(shutdown: &mut Pin<&mut F>) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.as_mut() => true,
        _ = std::future::ready(()) => false,
    }
}
