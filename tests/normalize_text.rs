// tests/normalize_text.rs
use newsreel::normalize;

#[test]
fn full_pass_recases_fixes_iz_and_summarizes() {
    let out = normalize("broker iz RUNNING. all good!");
    assert_eq!(out.text, "Broker is running. All good! Running good.");
}

#[test]
fn whitespace_count_covers_the_input_verbatim() {
    let out = normalize("one two.\tthree four.\n");
    assert_eq!(out.whitespace_count, 4);
}

#[test]
fn renormalizing_appends_a_fresh_summary() {
    let once = normalize("hello there. bye.");
    assert_eq!(once.text, "Hello there. Bye. There bye.");

    // Not a fixed point: the summary sentence itself grows the next summary.
    let twice = normalize(&once.text);
    assert_ne!(twice.text, once.text);
    assert!(twice.text.ends_with("There bye bye."));
}
