//! News Feed Tool — Binary Entrypoint
//! Parses the command line, builds the configured sink and analytics,
//! and runs one ingest pass (file source, or the terminal prompt when no
//! file is given).

use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsreel::analytics::Analytics;
use newsreel::config::{FeedConfig, SinkChoice};
use newsreel::ingest::{
    DelimitedFileSource, InteractiveSource, JsonFileSource, RecordSource, XmlFileSource,
};
use newsreel::pipeline::Pipeline;
use newsreel::record::RecordKind;
use newsreel::sink::{FileSink, RecordSink, TableSink};

/// Compact tracing logs, RUST_LOG overridable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(newsreel::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// News feed ingestion and normalization tool.
#[derive(Parser, Debug)]
#[command(name = "newsreel")]
#[command(about = "Ingest news-feed records from files or the terminal")]
#[command(version)]
struct Args {
    /// Source file to ingest; prompts on the terminal when omitted
    source: Option<PathBuf>,

    /// Source format: delimited | json | xml (inferred from the extension when omitted)
    #[arg(long)]
    format: Option<String>,

    /// Sink override: file | table
    #[arg(long)]
    sink: Option<String>,

    /// Keep the source file after a successful pass
    #[arg(long)]
    keep: bool,

    /// Config file path (TOML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Pick the adapter for `path`, by explicit format or file extension.
fn file_source(path: &Path, format: Option<&str>) -> Result<Box<dyn RecordSource>> {
    let format = match format {
        Some(f) => f.to_ascii_lowercase(),
        None => path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase(),
    };
    match format.as_str() {
        "delimited" | "txt" | "csv" => Ok(Box::new(DelimitedFileSource::new(path))),
        "json" => Ok(Box::new(JsonFileSource::new(path))),
        "xml" => Ok(Box::new(XmlFileSource::new(path))),
        other => Err(anyhow!(
            "cannot tell the format of {}: pass --format delimited|json|xml (got {other:?})",
            path.display()
        )),
    }
}

/// Resolve a source path, trying the configured data dir for bare names.
fn resolve_source(config: &FeedConfig, given: &Path) -> PathBuf {
    if !given.exists() && given.parent() == Some(Path::new("")) {
        let candidate = config.data_dir.join(given);
        if candidate.exists() {
            return candidate;
        }
    }
    given.to_path_buf()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op elsewhere.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FeedConfig::load_from(path)?,
        None => FeedConfig::load_default()?,
    };

    let sink_choice = match args.sink.as_deref() {
        None => config.sink,
        Some("file") => SinkChoice::File,
        Some("table") => SinkChoice::Table,
        Some(other) => bail!("unknown sink {other:?}: expected file or table"),
    };

    // Keep a handle to the table sink for the post-run totals.
    let mut table_totals: Option<TableSink> = None;
    let sink: Box<dyn RecordSink> = match sink_choice {
        SinkChoice::File => Box::new(FileSink::new(&config.feed_path)),
        SinkChoice::Table => {
            let table = TableSink::open(&config.database_path).await?;
            table_totals = Some(table.clone());
            Box::new(table)
        }
    };

    let analytics = Analytics::new(
        &config.word_count_path,
        &config.letter_count_path,
        config.cumulative_analytics,
    );
    let consume = config.consume_sources && !args.keep;
    let mut pipeline = Pipeline::new(sink, analytics, consume);

    let report = match &args.source {
        Some(given) => {
            let path = resolve_source(&config, given);
            let source = file_source(&path, args.format.as_deref())?;
            pipeline.run(source.as_ref()).await?
        }
        None => {
            let source = InteractiveSource::new(BufReader::new(io::stdin()), io::stdout());
            pipeline.run(&source).await?
        }
    };

    if let Some(table) = table_totals {
        for kind in [RecordKind::News, RecordKind::PrivateAd, RecordKind::Event] {
            let total = table.count(kind).await?;
            tracing::info!(table = kind.table(), total, "stored rows");
        }
    } else if report.written > 0 {
        tracing::info!(
            feed = %config.feed_path.display(),
            written = report.written,
            "feed file updated"
        );
    }

    Ok(())
}
