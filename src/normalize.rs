//! # Text Normalizer
//! Sentence-cases raw record text, fixes the `iz` typo, and appends a
//! synthesized summary sentence built from the last word of every sentence.
//! Also counts whitespace characters of the original input.
//!
//! Total over any input: no error paths, degenerate inputs produce `"."`.

use once_cell::sync::Lazy;
use regex::Regex;

/// A sentence ends at `.`, `!` or `?` followed by whitespace; the
/// punctuation stays with the sentence it terminates.
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary regex"));

/// The `iz` typo as a standalone word, any letter case.
static IZ_TYPO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[iI][zZ]\b").expect("valid iz typo regex"));

/// Output of [`normalize`]: the rewritten text plus the whitespace count of
/// the input it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Unicode whitespace characters in the *original untrimmed* input.
    pub whitespace_count: usize,
}

/// Normalize a block of record text.
///
/// 1) Trim, split into sentences at punctuation-plus-whitespace boundaries.
/// 2) Sentence-capitalize each sentence (first letter up, the rest down).
/// 3) Replace the whole-word typo `iz` with `is`.
/// 4) Collect the last word of every sentence (trailing `.!?` stripped).
/// 5) Append one synthesized sentence made of those words, capitalized and
///    `.`-terminated.
/// 6) Join everything with single spaces.
///
/// The whitespace count is taken over the input as passed in, not over the
/// normalized output, so re-normalizing the output is not a fixed point.
pub fn normalize(text: &str) -> Normalized {
    let whitespace_count = text.chars().filter(|c| c.is_whitespace()).count();

    let mut sentences: Vec<String> = split_sentences(text.trim())
        .into_iter()
        .map(|s| IZ_TYPO.replace_all(&capitalize(s), "is").into_owned())
        .collect();

    let mut last_words: Vec<&str> = Vec::with_capacity(sentences.len());
    for sentence in &sentences {
        let stripped = sentence.trim_end_matches(['.', '!', '?']);
        if let Some(word) = stripped.split_whitespace().last() {
            last_words.push(word);
        }
    }
    let mut summary = capitalize(&last_words.join(" "));
    summary.push('.');

    sentences.push(summary);
    Normalized {
        text: sentences.join(" "),
        whitespace_count,
    }
}

/// Split trimmed text into sentences, punctuation kept with each piece.
/// Empty input yields no sentences.
fn split_sentences(trimmed: &str) -> Vec<&str> {
    if trimmed.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(trimmed) {
        // The punctuation class is ASCII, so +1 lands on a char boundary.
        let punct_end = boundary.start() + 1;
        out.push(&trimmed[start..punct_end]);
        start = boundary.end();
    }
    // Trimmed input never ends in whitespace, so a tail piece always remains.
    out.push(&trimmed[start..]);
    out
}

/// Sentence-capitalize: first alphabetic character uppercased, every other
/// character lowercased.
fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut seen_alpha = false;
    for ch in s.chars() {
        if !seen_alpha && ch.is_alphabetic() {
            seen_alpha = true;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
