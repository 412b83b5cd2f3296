// src/sink/mod.rs
pub mod file;
pub mod table;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;

pub use file::FileSink;
pub use table::{EventRow, NewsRow, PrivateAdRow, TableSink};

/// Whether the sink stored the record or silently dropped it as a
/// duplicate (table sink only; the flat file never deduplicates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Stored,
    DuplicateIgnored,
}

/// Persistence capability for completed records. Write failures abort the
/// current batch; there is no partial-write recovery.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn write(&self, record: &Record) -> Result<WriteOutcome>;
    fn name(&self) -> &'static str;
}
