//! # Pipeline Orchestrator
//! Wires a source's output into sink writes and analytics updates, and
//! owns the consume-and-delete contract for file-backed sources.
//!
//! Per record: sink write (failure aborts the batch), then analytics
//! update — unconditionally, even when the table sink ignored the row as a
//! duplicate. The source file is deleted only after a pass whose writes
//! all succeeded.

use std::fs;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::analytics::Analytics;
use crate::error::{FeedError, Result};
use crate::ingest::RecordSource;
use crate::sink::{RecordSink, WriteOutcome};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_runs_total", "Completed ingest passes.");
        describe_counter!("feed_records_total", "Records constructed from sources.");
        describe_counter!("feed_skipped_total", "Source items skipped as malformed.");
        describe_counter!(
            "feed_duplicates_total",
            "Table-sink inserts ignored as duplicate text."
        );
    });
}

/// Counts from one ingest pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Records constructed from the source.
    pub produced: usize,
    /// Source items dropped as malformed.
    pub skipped: usize,
    /// Records the sink actually stored.
    pub written: usize,
    /// Records the sink ignored as duplicates.
    pub duplicates: usize,
}

pub struct Pipeline {
    sink: Box<dyn RecordSink>,
    analytics: Analytics,
    consume: bool,
}

impl Pipeline {
    pub fn new(sink: Box<dyn RecordSink>, analytics: Analytics, consume: bool) -> Self {
        Self {
            sink,
            analytics,
            consume,
        }
    }

    /// Run one pass over `source`. A missing source is reported and
    /// yields an empty report; only sink failures propagate.
    pub async fn run(&mut self, source: &dyn RecordSource) -> Result<RunReport> {
        ensure_metrics_described();

        let batch = match source.fetch().await {
            Ok(batch) => batch,
            Err(FeedError::SourceNotFound { path }) => {
                tracing::warn!(target: "pipeline", source = source.name(), path = %path.display(), "source not found; nothing ingested");
                return Ok(RunReport::default());
            }
            Err(e) => return Err(e),
        };

        let mut report = RunReport {
            produced: batch.records.len(),
            skipped: batch.skipped,
            ..RunReport::default()
        };

        for record in &batch.records {
            match self.sink.write(record).await? {
                WriteOutcome::Stored => {
                    report.written += 1;
                    tracing::debug!(target: "pipeline", kind = record.kind().table(), "record stored");
                }
                WriteOutcome::DuplicateIgnored => {
                    report.duplicates += 1;
                    tracing::debug!(target: "pipeline", kind = record.kind().table(), text = record.text(), "duplicate ignored");
                }
            }
            // Analytics track what was processed, not what was stored.
            self.analytics.update(record.text())?;
        }

        if self.consume {
            if let Some(path) = source.consume_path() {
                match fs::remove_file(path) {
                    Ok(()) => {
                        tracing::info!(target: "pipeline", path = %path.display(), "source consumed")
                    }
                    Err(e) => {
                        tracing::warn!(target: "pipeline", path = %path.display(), error = %e, "source could not be deleted")
                    }
                }
            }
        }

        counter!("feed_runs_total").increment(1);
        counter!("feed_records_total").increment(report.produced as u64);
        counter!("feed_skipped_total").increment(report.skipped as u64);
        counter!("feed_duplicates_total").increment(report.duplicates as u64);

        let RunReport {
            produced,
            skipped,
            written,
            duplicates,
        } = report;
        tracing::info!(
            target: "pipeline",
            source = source.name(),
            sink = self.sink.name(),
            produced,
            skipped,
            written,
            duplicates,
            "ingest pass complete"
        );
        Ok(report)
    }
}
