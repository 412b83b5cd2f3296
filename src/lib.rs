// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod sink;

/// Default log filter the binary installs when `RUST_LOG` is unset.
/// The `pipeline` and `ingest` event targets are named so pass summaries
/// and consume notices show at normal verbosity.
pub const DEFAULT_LOG_FILTER: &str = "newsreel=info,pipeline=info,ingest=info,warn";

// ---- Re-exports for stable public API ----
pub use crate::config::{FeedConfig, SinkChoice};
pub use crate::error::{FeedError, Result};
pub use crate::normalize::{normalize, Normalized};
pub use crate::pipeline::{Pipeline, RunReport};
pub use crate::record::{Record, RecordKind};
