// tests/record_fields.rs
use chrono::{Days, Local, NaiveDateTime};
use newsreel::record::{Record, PUBLISH_FORMAT};

#[test]
fn feed_line_starts_with_a_parseable_publish_stamp() {
    let r = Record::news("stamped", "Oslo").unwrap();
    let line = r.feed_line();
    let stamp = &line[..19]; // YYYY-MM-DD HH:MM:SS
    assert!(NaiveDateTime::parse_from_str(stamp, PUBLISH_FORMAT).is_ok());
}

#[test]
fn days_left_counts_whole_days_from_now() {
    let target = Local::now().date_naive() + Days::new(10);
    let r = Record::private_ad("closes soon", &target.format("%Y-%m-%d").to_string()).unwrap();
    match r {
        // 10 exactly at midnight, 9 the rest of the day
        Record::PrivateAd(ad) => assert!((9..=10).contains(&ad.days_left)),
        other => panic!("expected an ad, got {other:?}"),
    }
}

#[test]
fn surrounding_whitespace_in_dates_is_tolerated() {
    let r = Record::event("kickoff", "Brno", " 2099-05-01 ").unwrap();
    match r {
        Record::Event(ev) => assert!(ev.days_until_event > 0),
        other => panic!("expected an event, got {other:?}"),
    }
}
