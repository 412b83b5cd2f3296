// tests/config_load.rs
use std::path::PathBuf;

use newsreel::config::{FeedConfig, SinkChoice};

#[test]
fn explicit_toml_and_json_paths_load() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("newsreel.toml");
    std::fs::write(
        &toml_path,
        "sink = \"table\"\ndatabase_path = \"custom.db\"\n",
    )
    .unwrap();
    let cfg = FeedConfig::load_from(&toml_path).unwrap();
    assert_eq!(cfg.sink, SinkChoice::Table);
    assert_eq!(cfg.database_path, PathBuf::from("custom.db"));

    let json_path = dir.path().join("newsreel.json");
    std::fs::write(&json_path, r#"{"cumulative_analytics": true}"#).unwrap();
    let cfg = FeedConfig::load_from(&json_path).unwrap();
    assert!(cfg.cumulative_analytics);
    assert!(cfg.consume_sources);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FeedConfig::load_from(&dir.path().join("absent.toml")).is_err());
}
