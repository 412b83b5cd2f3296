// src/ingest/xml.rs
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::{FeedError, Result};
use crate::ingest::{push_built, read_source, RawRecord, RecordSource, SourceBatch};

/// XML source: `<records>` root with `<record type="...">` children whose
/// fields are child elements.
#[derive(Debug, Clone)]
pub struct XmlFileSource {
    path: PathBuf,
}

impl XmlFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Deserialize)]
struct RecordsDoc {
    #[serde(rename = "record", default)]
    records: Vec<XmlRecord>,
}

#[derive(Debug, Deserialize)]
struct XmlRecord {
    #[serde(rename = "@type")]
    kind: Option<String>,
    text: Option<String>,
    city: Option<String>,
    expiration_date: Option<String>,
    location: Option<String>,
    event_date: Option<String>,
}

impl XmlRecord {
    /// Map discriminator plus child elements into a raw tuple. Element
    /// text is trimmed on the way in.
    fn into_raw(self) -> Result<RawRecord> {
        let kind = self
            .kind
            .ok_or_else(|| FeedError::malformed("record element has no type attribute"))?;
        let text = required("text", self.text)?;
        match kind.as_str() {
            "news" => Ok(RawRecord::News {
                text,
                city: required("city", self.city)?,
            }),
            "private_ad" => Ok(RawRecord::PrivateAd {
                text,
                expiration_date: required("expiration_date", self.expiration_date)?,
            }),
            "event" => Ok(RawRecord::Event {
                text,
                location: required("location", self.location)?,
                event_date: required("event_date", self.event_date)?,
            }),
            other => Err(FeedError::malformed(format!(
                "unknown record type: {other}"
            ))),
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None => Err(FeedError::malformed(format!("missing element <{field}>"))),
    }
}

#[async_trait]
impl RecordSource for XmlFileSource {
    async fn fetch(&self) -> Result<SourceBatch> {
        let content = read_source(&self.path)?;

        let doc: RecordsDoc = match from_str(&content) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(target: "ingest", source = "xml", error = %e, "document did not parse; nothing to ingest");
                return Ok(SourceBatch::default());
            }
        };

        let mut batch = SourceBatch::default();
        for record in doc.records {
            match record.into_raw() {
                Ok(raw) => push_built(&mut batch, "xml", raw),
                Err(e) => {
                    tracing::warn!(target: "ingest", source = "xml", error = %e, "skipping record element");
                    batch.skipped += 1;
                }
            }
        }
        Ok(batch)
    }

    fn name(&self) -> &'static str {
        "xml"
    }

    fn consume_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
