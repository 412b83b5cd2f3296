// src/config.rs
//! # Feed Configuration
//! Artifact paths and pipeline toggles, loaded from TOML or JSON.
//! Resolution order: `$NEWSREEL_CONFIG_PATH`, then `config/newsreel.toml`,
//! then `config/newsreel.json`, then built-in defaults.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "NEWSREEL_CONFIG_PATH";

/// Persistence target for ingested records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkChoice {
    /// Append feed lines to a plain text file.
    #[default]
    File,
    /// Insert into per-kind SQLite tables.
    Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Flat feed file the file sink appends to.
    pub feed_path: PathBuf,
    /// SQLite database the table sink writes to.
    pub database_path: PathBuf,
    pub word_count_path: PathBuf,
    pub letter_count_path: PathBuf,
    /// Default folder for ingest source files.
    pub data_dir: PathBuf,
    pub sink: SinkChoice,
    /// Delete file sources after a fully written pass.
    pub consume_sources: bool,
    /// Accumulate analytics across updates instead of per-record rebuild.
    pub cumulative_analytics: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from("news_feed.txt"),
            database_path: PathBuf::from("news_feed.db"),
            word_count_path: PathBuf::from("word-count.csv"),
            letter_count_path: PathBuf::from("letter-count.csv"),
            data_dir: PathBuf::from("data"),
            sink: SinkChoice::default(),
            consume_sources: true,
            cumulative_analytics: false,
        }
    }
}

impl FeedConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWSREEL_CONFIG_PATH
    /// 2) config/newsreel.toml
    /// 3) config/newsreel.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("NEWSREEL_CONFIG_PATH points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/newsreel.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/newsreel.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    // Try TOML first if hinted or content does not look like a JSON object.
    let try_toml = hint_ext == "toml" || !s.trim_start().starts_with('{');
    if try_toml {
        if let Ok(cfg) = toml::from_str(s) {
            return Ok(cfg);
        }
    }
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }
    if !try_toml {
        if let Ok(cfg) = toml::from_str(s) {
            return Ok(cfg);
        }
    }
    Err(anyhow!("unsupported config format"))
}
