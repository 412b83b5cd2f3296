// src/ingest/delimited.rs
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{FeedError, Result};
use crate::ingest::{push_built, read_source, RawRecord, RecordSource, SourceBatch};
use crate::normalize::normalize;

/// Pipe-delimited text source: one record per line, first field selects
/// the variant.
///
/// `News|text|city`, `PrivateAd|text|expiration_date`,
/// `Event|text|location|event_date`. The text field is run through the
/// normalizer; only the normalized text is kept.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    path: PathBuf,
}

impl DelimitedFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for DelimitedFileSource {
    async fn fetch(&self) -> Result<SourceBatch> {
        let content = read_source(&self.path)?;

        let mut batch = SourceBatch::default();
        for line in content.lines() {
            match parse_line(line) {
                Ok(raw) => push_built(&mut batch, "delimited", raw),
                Err(e) => {
                    tracing::warn!(target: "ingest", source = "delimited", line, error = %e, "skipping line");
                    batch.skipped += 1;
                }
            }
        }
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "delimited"
    }

    fn consume_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

fn parse_line(line: &str) -> Result<RawRecord> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    match (parts[0], parts.len()) {
        ("News", 3) => Ok(RawRecord::News {
            text: normalize(parts[1]).text,
            city: parts[2].to_string(),
        }),
        ("PrivateAd", 3) => Ok(RawRecord::PrivateAd {
            text: normalize(parts[1]).text,
            expiration_date: parts[2].to_string(),
        }),
        ("Event", 4) => Ok(RawRecord::Event {
            text: normalize(parts[1]).text,
            location: parts[2].to_string(),
            event_date: parts[3].to_string(),
        }),
        (kind, len) => Err(FeedError::malformed(format!(
            "unrecognized line shape: kind {kind:?} with {len} fields"
        ))),
    }
}
