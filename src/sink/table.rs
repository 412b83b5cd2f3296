// src/sink/table.rs
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::Result;
use crate::record::{Record, RecordKind, DATE_FORMAT, PUBLISH_FORMAT};
use crate::sink::{RecordSink, WriteOutcome};

/// Relational sink: one table per record variant, `text` unique per table,
/// inserts are `INSERT OR IGNORE` so a repeated text is silently dropped.
///
/// Holds a single pooled connection for the pipeline lifetime; every
/// statement commits on its own.
#[derive(Debug, Clone)]
pub struct TableSink {
    pool: SqlitePool,
}

/// Durable row for a News record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NewsRow {
    pub id: i64,
    pub text: String,
    pub city: String,
    pub publish_date: String,
}

/// Durable row for a PrivateAd record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PrivateAdRow {
    pub id: i64,
    pub text: String,
    pub expiration_date: String,
    pub days_left: i64,
    pub publish_date: String,
}

/// Durable row for an Event record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub text: String,
    pub location: String,
    pub event_date: String,
    pub days_until_event: i64,
    pub publish_date: String,
}

impl TableSink {
    /// Open (or create) the database file and make sure all three variant
    /// tables exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let sink = Self { pool };
        sink.ensure_tables().await?;
        Ok(sink)
    }

    async fn ensure_tables(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS News (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT UNIQUE,
                city TEXT,
                publish_date TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS PrivateAd (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT UNIQUE,
                expiration_date TEXT,
                days_left INTEGER,
                publish_date TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS Event (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT UNIQUE,
                location TEXT,
                event_date TEXT,
                days_until_event INTEGER,
                publish_date TEXT
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Rows of the News table in insertion order.
    pub async fn news_rows(&self) -> Result<Vec<NewsRow>> {
        let rows = sqlx::query_as::<_, NewsRow>(
            "SELECT id, text, city, publish_date FROM News ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Rows of the PrivateAd table in insertion order.
    pub async fn private_ad_rows(&self) -> Result<Vec<PrivateAdRow>> {
        let rows = sqlx::query_as::<_, PrivateAdRow>(
            "SELECT id, text, expiration_date, days_left, publish_date
             FROM PrivateAd ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Rows of the Event table in insertion order.
    pub async fn event_rows(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, text, location, event_date, days_until_event, publish_date
             FROM Event ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Number of rows in the variant's table.
    pub async fn count(&self, kind: RecordKind) -> Result<i64> {
        // Table names come from the closed enum, never from input.
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(n)
    }
}

#[async_trait]
impl RecordSink for TableSink {
    async fn write(&self, record: &Record) -> Result<WriteOutcome> {
        let done = match record {
            Record::News(n) => {
                sqlx::query("INSERT OR IGNORE INTO News (text, city, publish_date) VALUES (?, ?, ?)")
                    .bind(&n.text)
                    .bind(&n.city)
                    .bind(n.publish_date.format(PUBLISH_FORMAT).to_string())
                    .execute(&self.pool)
                    .await?
            }
            Record::PrivateAd(ad) => {
                sqlx::query(
                    "INSERT OR IGNORE INTO PrivateAd
                     (text, expiration_date, days_left, publish_date) VALUES (?, ?, ?, ?)",
                )
                .bind(&ad.text)
                .bind(ad.expiration_date.format(DATE_FORMAT).to_string())
                .bind(ad.days_left)
                .bind(ad.publish_date.format(PUBLISH_FORMAT).to_string())
                .execute(&self.pool)
                .await?
            }
            Record::Event(ev) => {
                sqlx::query(
                    "INSERT OR IGNORE INTO Event
                     (text, location, event_date, days_until_event, publish_date)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&ev.text)
                .bind(&ev.location)
                .bind(ev.event_date.format(DATE_FORMAT).to_string())
                .bind(ev.days_until_event)
                .bind(ev.publish_date.format(PUBLISH_FORMAT).to_string())
                .execute(&self.pool)
                .await?
            }
        };

        if done.rows_affected() == 0 {
            Ok(WriteOutcome::DuplicateIgnored)
        } else {
            Ok(WriteOutcome::Stored)
        }
    }

    fn name(&self) -> &'static str {
        "table"
    }
}
