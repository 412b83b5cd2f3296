//! Error types for the record pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while ingesting and persisting records.
///
/// Only the sink variants abort a batch; everything else is caught at the
/// adapter loop and downgraded to a skip.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The adapter's target file is missing or cannot be opened.
    /// Reported and treated as a no-op pass; the source is never deleted.
    #[error("source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Wrong field count, unknown discriminator, blank text, or an item
    /// that would not decode. The item is skipped; the batch continues.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// A date string that is not a valid `YYYY-MM-DD` calendar date.
    /// Fatal to that record's construction only.
    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    DateParse { value: String },

    /// I/O failure while writing the flat feed file or an analytics
    /// artifact. Aborts the current batch.
    #[error("sink write failed: {source}")]
    SinkWrite {
        #[from]
        source: std::io::Error,
    },

    /// SQL failure while writing or reading the table sink. Aborts the
    /// current batch.
    #[error("table write failed: {source}")]
    TableWrite {
        #[from]
        source: sqlx::Error,
    },
}

impl FeedError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }
}
