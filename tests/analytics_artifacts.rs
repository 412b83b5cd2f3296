// tests/analytics_artifacts.rs
use newsreel::analytics::Analytics;

#[test]
fn latest_record_replaces_the_tallies_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("word-count.csv");
    let letters = dir.path().join("letter-count.csv");
    let mut analytics = Analytics::new(&words, &letters, false);

    analytics.update("Alpha beta alpha").unwrap();
    analytics.update("Gamma gamma DELTA").unwrap();

    // Only the second text is left; words keep first-occurrence order.
    let word_csv = std::fs::read_to_string(&words).unwrap();
    assert_eq!(word_csv, "Word,Count\ngamma,2\ndelta,1\n");

    let letter_csv = std::fs::read_to_string(&letters).unwrap();
    let mut lines = letter_csv.lines();
    assert_eq!(
        lines.next(),
        Some("Text,Count_All,Count_Uppercase,Percentage")
    );
    assert_eq!(lines.next(), Some("Gamma gamma DELTA,15,6,40"));
}

#[test]
fn cumulative_mode_keeps_counting_across_updates() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("word-count.csv");
    let letters = dir.path().join("letter-count.csv");
    let mut analytics = Analytics::new(&words, &letters, true);

    analytics.update("alpha beta").unwrap();
    analytics.update("alpha").unwrap();

    let word_csv = std::fs::read_to_string(&words).unwrap();
    assert_eq!(word_csv, "Word,Count\nalpha,2\nbeta,1\n");
}

#[test]
fn empty_text_still_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("word-count.csv");
    let letters = dir.path().join("letter-count.csv");
    let mut analytics = Analytics::new(&words, &letters, false);

    analytics.update("").unwrap();

    assert_eq!(
        std::fs::read_to_string(&words).unwrap(),
        "Word,Count\n"
    );
    // Zero letters means a zero percentage, not a division error.
    assert_eq!(
        std::fs::read_to_string(&letters).unwrap(),
        "Text,Count_All,Count_Uppercase,Percentage\n,0,0,0\n"
    );
}
