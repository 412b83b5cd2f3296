//! # Analytics Accumulator
//! Word-frequency and letter/case statistics over record text, flushed to
//! two CSV artifacts on every update (overwrite, not append).
//!
//! Default semantics rebuild both tallies from scratch per call, so the
//! artifacts always describe the most recently processed record; the
//! `cumulative` toggle switches to accumulation across calls instead.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LetterTotals {
    letters: u64,
    uppercase: u64,
}

#[derive(Debug)]
pub struct Analytics {
    word_count_path: PathBuf,
    letter_count_path: PathBuf,
    cumulative: bool,
    /// Word tally in first-occurrence order; cleared per call unless
    /// cumulative.
    words: Vec<(String, u64)>,
    letters: LetterTotals,
    last_text: String,
}

impl Analytics {
    pub fn new(
        word_count_path: impl Into<PathBuf>,
        letter_count_path: impl Into<PathBuf>,
        cumulative: bool,
    ) -> Self {
        Self {
            word_count_path: word_count_path.into(),
            letter_count_path: letter_count_path.into(),
            cumulative,
            words: Vec::new(),
            letters: LetterTotals::default(),
            last_text: String::new(),
        }
    }

    /// Tally `text` and rewrite both artifacts. Called once per record,
    /// after the sink write, unconditionally (duplicates included).
    pub fn update(&mut self, text: &str) -> Result<()> {
        if !self.cumulative {
            self.words.clear();
            self.letters = LetterTotals::default();
        }

        for word in text.to_lowercase().split_whitespace() {
            match self.words.iter_mut().find(|(w, _)| w == word) {
                Some((_, count)) => *count += 1,
                None => self.words.push((word.to_string(), 1)),
            }
        }

        for ch in text.chars().filter(|c| c.is_alphabetic()) {
            self.letters.letters += 1;
            if ch.is_uppercase() {
                self.letters.uppercase += 1;
            }
        }
        self.last_text = text.to_string();

        self.flush_word_count()?;
        self.flush_letter_count()
    }

    fn flush_word_count(&self) -> Result<()> {
        let mut out = String::from("Word,Count\n");
        for (word, count) in &self.words {
            out.push_str(&format!("{},{}\n", csv_field(word), count));
        }
        fs::write(&self.word_count_path, out)?;
        Ok(())
    }

    fn flush_letter_count(&self) -> Result<()> {
        let LetterTotals { letters, uppercase } = self.letters;
        let percentage = if letters > 0 {
            100.0 * uppercase as f64 / letters as f64
        } else {
            0.0
        };
        let out = format!(
            "Text,Count_All,Count_Uppercase,Percentage\n{},{},{},{}\n",
            csv_field(&self.last_text),
            letters,
            uppercase,
            percentage
        );
        fs::write(&self.letter_count_path, out)?;
        Ok(())
    }
}

/// Quote a CSV field only when it needs it.
fn csv_field(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
