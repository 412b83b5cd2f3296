// src/ingest/mod.rs
pub mod delimited;
pub mod interactive;
pub mod json;
pub mod xml;

use std::fs;
use std::path::Path;

use async_trait::async_trait;

use crate::error::{FeedError, Result};
use crate::record::Record;

pub use delimited::DelimitedFileSource;
pub use interactive::InteractiveSource;
pub use json::JsonFileSource;
pub use xml::XmlFileSource;

/// What one adapter pass produced: the records that built cleanly plus the
/// number of items skipped as malformed.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// A source-specific reader yielding zero or more records per pass.
///
/// Adapters are tolerant of per-item errors (skip, log, continue); `fetch`
/// itself fails only when the source cannot be opened at all.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self) -> Result<SourceBatch>;

    fn name(&self) -> &'static str;

    /// File to delete once a pass has been fully written; `None` for
    /// non-file sources.
    fn consume_path(&self) -> Option<&Path> {
        None
    }
}

/// Field tuple common to the file-based adapters, parsed but not yet
/// validated. [`RawRecord::build`] runs construction (publish stamp, date
/// parsing, derived fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    News {
        text: String,
        city: String,
    },
    PrivateAd {
        text: String,
        expiration_date: String,
    },
    Event {
        text: String,
        location: String,
        event_date: String,
    },
}

impl RawRecord {
    pub fn build(self) -> Result<Record> {
        match self {
            RawRecord::News { text, city } => Record::news(text, city),
            RawRecord::PrivateAd {
                text,
                expiration_date,
            } => Record::private_ad(text, &expiration_date),
            RawRecord::Event {
                text,
                location,
                event_date,
            } => Record::event(text, location, &event_date),
        }
    }
}

/// Construct a record from a raw tuple; a failure is logged and counted as
/// a skip, keeping the batch going.
pub(crate) fn push_built(batch: &mut SourceBatch, source: &'static str, raw: RawRecord) {
    match raw.build() {
        Ok(record) => batch.records.push(record),
        Err(e) => {
            tracing::warn!(target: "ingest", source, error = %e, "skipping record");
            batch.skipped += 1;
        }
    }
}

/// Read a whole source file; any open/read failure surfaces as
/// `SourceNotFound`, which short-circuits the pass with no deletion.
pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|_| FeedError::source_not_found(path))
}
