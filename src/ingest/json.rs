// src/ingest/json.rs
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::ingest::{push_built, read_source, RawRecord, RecordSource, SourceBatch};

/// JSON source: a top-level array of objects with a `"type"` discriminator.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Wire shape of one array element.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonRecord {
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

impl From<JsonRecord> for RawRecord {
    fn from(wire: JsonRecord) -> Self {
        match wire {
            JsonRecord::News { text, city } => RawRecord::News { text, city },
            JsonRecord::PrivateAd {
                text,
                expiration_date,
            } => RawRecord::PrivateAd {
                text,
                expiration_date,
            },
            JsonRecord::Event {
                text,
                location,
                event_date,
            } => RawRecord::Event {
                text,
                location,
                event_date,
            },
        }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self) -> Result<SourceBatch> {
        let content = read_source(&self.path)?;

        // Decode element by element so one bad object (unknown type,
        // missing field) skips just that object, not the document.
        let elements: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(target: "ingest", source = "json", error = %e, "document is not a record array; nothing to ingest");
                return Ok(SourceBatch::default());
            }
        };

        let mut batch = SourceBatch::default();
        for element in elements {
            match serde_json::from_value::<JsonRecord>(element) {
                Ok(wire) => push_built(&mut batch, "json", wire.into()),
                Err(e) => {
                    tracing::warn!(target: "ingest", source = "json", error = %e, "skipping element");
                    batch.skipped += 1;
                }
            }
        }
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn consume_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_variants_deserialize() {
        let wire: JsonRecord =
            serde_json::from_str(r#"{"type":"news","text":"t","city":"Rome"}"#).unwrap();
        assert!(matches!(wire, JsonRecord::News { .. }));

        let wire: JsonRecord = serde_json::from_str(
            r#"{"type":"private_ad","text":"t","expiration_date":"2099-01-01"}"#,
        )
        .unwrap();
        assert!(matches!(wire, JsonRecord::PrivateAd { .. }));
    }

    #[test]
    fn unknown_type_is_an_element_error() {
        let res: std::result::Result<JsonRecord, _> =
            serde_json::from_str(r#"{"type":"weather","text":"t"}"#);
        assert!(res.is_err());
    }
}
