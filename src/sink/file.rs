// src/sink/file.rs
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;
use crate::sink::{RecordSink, WriteOutcome};

/// Append-only flat-file sink: one formatted line per record.
///
/// The file handle is opened per write and released before returning, so
/// every record lands flushed on its own open–write–close cycle.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSink for FileSink {
    async fn write(&self, record: &Record) -> Result<WriteOutcome> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.feed_line())?;
        file.flush()?;
        Ok(WriteOutcome::Stored)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
