//! # Record Model
//! The three feed entry shapes as one closed tagged union. Construction
//! stamps the publish date, validates input, and computes the derived
//! day-count fields exactly once; nothing is refreshed afterwards.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{FeedError, Result};

/// Input format for expiration and event dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Render format for the publish timestamp at sink boundaries.
pub const PUBLISH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Discriminator for the three record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    News,
    PrivateAd,
    Event,
}

impl RecordKind {
    /// Table name used by the table sink; doubles as the display name.
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::News => "News",
            RecordKind::PrivateAd => "PrivateAd",
            RecordKind::Event => "Event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub text: String,
    pub city: String,
    pub publish_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateAd {
    pub text: String,
    pub expiration_date: NaiveDate,
    /// Whole days from construction time to expiration, truncated toward
    /// zero; negative when already expired.
    pub days_left: i64,
    pub publish_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub text: String,
    pub location: String,
    pub event_date: NaiveDate,
    /// Same rule as [`PrivateAd::days_left`].
    pub days_until_event: i64,
    pub publish_date: NaiveDateTime,
}

/// One news-feed entry. Closed set: new shapes are new variants, not
/// subclasses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    News(News),
    PrivateAd(PrivateAd),
    Event(Event),
}

impl Record {
    pub fn news(text: impl Into<String>, city: impl Into<String>) -> Result<Self> {
        Ok(Record::News(News {
            text: validated_text(text)?,
            city: city.into(),
            publish_date: publish_stamp(),
        }))
    }

    pub fn private_ad(text: impl Into<String>, expiration_date: &str) -> Result<Self> {
        let expiration_date = parse_iso_date(expiration_date)?;
        Ok(Record::PrivateAd(PrivateAd {
            text: validated_text(text)?,
            expiration_date,
            days_left: days_from_now(expiration_date),
            publish_date: publish_stamp(),
        }))
    }

    pub fn event(
        text: impl Into<String>,
        location: impl Into<String>,
        event_date: &str,
    ) -> Result<Self> {
        let event_date = parse_iso_date(event_date)?;
        Ok(Record::Event(Event {
            text: validated_text(text)?,
            location: location.into(),
            event_date,
            days_until_event: days_from_now(event_date),
            publish_date: publish_stamp(),
        }))
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::News(_) => RecordKind::News,
            Record::PrivateAd(_) => RecordKind::PrivateAd,
            Record::Event(_) => RecordKind::Event,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Record::News(n) => &n.text,
            Record::PrivateAd(ad) => &ad.text,
            Record::Event(ev) => &ev.text,
        }
    }

    pub fn publish_date(&self) -> NaiveDateTime {
        match self {
            Record::News(n) => n.publish_date,
            Record::PrivateAd(ad) => ad.publish_date,
            Record::Event(ev) => ev.publish_date,
        }
    }

    /// The one line the flat-file sink appends for this record.
    pub fn feed_line(&self) -> String {
        match self {
            Record::News(n) => format!(
                "{} {} {}",
                n.publish_date.format(PUBLISH_FORMAT),
                n.city,
                n.text
            ),
            Record::PrivateAd(ad) => format!(
                "{} {} Days left: {}",
                ad.publish_date.format(PUBLISH_FORMAT),
                ad.text,
                ad.days_left
            ),
            Record::Event(ev) => format!(
                "{} {} {} Days until event: {}",
                ev.publish_date.format(PUBLISH_FORMAT),
                ev.location,
                ev.text,
                ev.days_until_event
            ),
        }
    }
}

/// Creation instant, local wall clock. Non-decreasing across records built
/// in sequence within one process run.
fn publish_stamp() -> NaiveDateTime {
    Local::now().naive_local()
}

fn validated_text(text: impl Into<String>) -> Result<String> {
    let text = text.into();
    if text.trim().is_empty() {
        return Err(FeedError::malformed("record text is empty"));
    }
    Ok(text)
}

fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FeedError::DateParse {
        value: value.to_string(),
    })
}

/// Whole days from now until midnight of `date`, truncated toward zero.
fn days_from_now(date: NaiveDate) -> i64 {
    (date.and_time(NaiveTime::MIN) - Local::now().naive_local()).num_days()
}
