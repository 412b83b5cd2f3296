// tests/pipeline_e2e.rs
// Whole passes over real temp files: source to sink to analytics, plus
// the consume-and-delete contract.

use std::path::Path;

use newsreel::analytics::Analytics;
use newsreel::error::FeedError;
use newsreel::ingest::{DelimitedFileSource, JsonFileSource};
use newsreel::pipeline::{Pipeline, RunReport};
use newsreel::record::RecordKind;
use newsreel::sink::{FileSink, TableSink};

fn analytics_in(dir: &Path) -> Analytics {
    Analytics::new(
        dir.join("word-count.csv"),
        dir.join("letter-count.csv"),
        false,
    )
}

#[tokio::test]
async fn json_to_table_pass_consumes_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("records.json");
    std::fs::write(
        &source_path,
        r#"[
            {"type": "news", "text": "harbor reopens", "city": "Kiel"},
            {"type": "news", "text": "harbor reopens", "city": "Kiel"},
            {"type": "event", "text": "solar eclipse watch", "location": "observatory", "event_date": "2099-04-20"}
        ]"#,
    )
    .unwrap();

    let table = TableSink::open(dir.path().join("feed.db")).await.unwrap();
    let mut pipeline = Pipeline::new(Box::new(table.clone()), analytics_in(dir.path()), true);

    let report = pipeline
        .run(&JsonFileSource::new(&source_path))
        .await
        .unwrap();

    assert_eq!(
        report,
        RunReport {
            produced: 3,
            skipped: 0,
            written: 2,
            duplicates: 1
        }
    );
    assert!(
        !source_path.exists(),
        "a fully written pass deletes its source"
    );
    assert_eq!(table.count(RecordKind::News).await.unwrap(), 1);
    assert_eq!(table.count(RecordKind::Event).await.unwrap(), 1);

    // Analytics ran for every record, the ignored duplicate included;
    // the artifacts describe the last processed text.
    let words = std::fs::read_to_string(dir.path().join("word-count.csv")).unwrap();
    assert!(words.contains("eclipse,1"));
}

#[tokio::test]
async fn keep_mode_leaves_the_source_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("records.txt");
    std::fs::write(&source_path, "News|city hall closes early|Tartu\n").unwrap();

    let feed = dir.path().join("news_feed.txt");
    let mut pipeline = Pipeline::new(
        Box::new(FileSink::new(&feed)),
        analytics_in(dir.path()),
        false,
    );

    let report = pipeline
        .run(&DelimitedFileSource::new(&source_path))
        .await
        .unwrap();

    assert_eq!(report.written, 1);
    assert!(source_path.exists());
    assert!(std::fs::read_to_string(&feed).unwrap().contains("Tartu"));
}

#[tokio::test]
async fn sink_failure_aborts_the_pass_and_keeps_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("records.txt");
    std::fs::write(&source_path, "News|power cut downtown|Vilnius\n").unwrap();

    // A directory on the feed path makes every append fail.
    let feed = dir.path().join("news_feed.txt");
    std::fs::create_dir(&feed).unwrap();

    let mut pipeline = Pipeline::new(
        Box::new(FileSink::new(&feed)),
        analytics_in(dir.path()),
        true,
    );

    let err = pipeline
        .run(&DelimitedFileSource::new(&source_path))
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::SinkWrite { .. }));
    assert!(
        source_path.exists(),
        "a failed pass must leave its source in place"
    );
}

#[tokio::test]
async fn missing_source_reports_an_empty_pass() {
    let dir = tempfile::tempdir().unwrap();
    let mut pipeline = Pipeline::new(
        Box::new(FileSink::new(dir.path().join("news_feed.txt"))),
        analytics_in(dir.path()),
        true,
    );

    let report = pipeline
        .run(&DelimitedFileSource::new(dir.path().join("absent.txt")))
        .await
        .unwrap();
    assert_eq!(report, RunReport::default());
}

#[tokio::test]
async fn rerunning_a_regrown_source_stores_nothing_new() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("records.json");
    let body = r#"[{"type": "news", "text": "tram line extended", "city": "Riga"}]"#;

    let table = TableSink::open(dir.path().join("feed.db")).await.unwrap();
    let mut pipeline = Pipeline::new(Box::new(table.clone()), analytics_in(dir.path()), true);

    std::fs::write(&source_path, body).unwrap();
    let first = pipeline
        .run(&JsonFileSource::new(&source_path))
        .await
        .unwrap();
    assert_eq!((first.written, first.duplicates), (1, 0));
    assert!(!source_path.exists());

    // The same feed shows up again later.
    std::fs::write(&source_path, body).unwrap();
    let second = pipeline
        .run(&JsonFileSource::new(&source_path))
        .await
        .unwrap();
    assert_eq!((second.written, second.duplicates), (0, 1));
    assert_eq!(table.count(RecordKind::News).await.unwrap(), 1);
}
