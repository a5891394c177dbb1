//! Single text filtering.
use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::Filter;
use crate::config::{FORBIDDEN_WORDS_MAX, LONG_TARGET_WORDS, LOWER_WORD_THRESHOLD};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// Phrases betraying scraped UI elements or scraper failures.
pub const UNWANTED_PHRASES: [&str; 18] = [
    "add to cart",
    "buy now",
    "click here",
    "read more",
    "sign up",
    "subscribe",
    "free trial",
    "learn more",
    "checkout",
    "order now",
    "view details",
    "title",
    "heading",
    "null",
    "n/a",
    "loading...",
    "error",
    "undefined",
];

/// Words pointing at download pages rather than content.
pub const FORBIDDEN_WORDS: [&str; 3] = ["save", "pdf", "download"];

/// Number of whitespace-separated words.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word count filter.
/// Returns `false` if provided text has less than [WordCount::min_words] whitespace-separated words.
///
/// [WordCount::min_words] is [LOWER_WORD_THRESHOLD] by default.
pub struct WordCount {
    min_words: usize,
}

impl WordCount {
    pub fn with_min_words(min_words: usize) -> Self {
        Self { min_words }
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self::with_min_words(LOWER_WORD_THRESHOLD)
    }
}

impl Filter<&str> for WordCount {
    fn detect(&self, text: &str) -> bool {
        word_count(text) >= self.min_words
    }
}

/// Answer completeness filter.
///
/// An answer is kept if it ends like a sentence (`.` or `।`),
/// or if it is long (more than [Completeness::long_words] words) and free of every [UNWANTED_PHRASES] entry.
/// Phrase matching is a case-insensitive substring search.
pub struct Completeness {
    long_words: usize,
    phrases: Vec<&'static str>,
}

impl Completeness {
    pub fn new(long_words: usize) -> Self {
        Self {
            long_words,
            phrases: UNWANTED_PHRASES.to_vec(),
        }
    }

    /// returns the first unwanted phrase found in `text`, if any.
    pub fn unwanted_phrase(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| lowered.contains(*phrase))
            .copied()
    }
}

impl Default for Completeness {
    fn default() -> Self {
        Self::new(LONG_TARGET_WORDS)
    }
}

impl Filter<&str> for Completeness {
    fn detect(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.ends_with('.') || trimmed.ends_with('।') {
            return true;
        }

        word_count(text) > self.long_words && self.unwanted_phrase(text).is_none()
    }
}

/// Forbidden words filter.
///
/// Counts case-insensitive occurrences of [FORBIDDEN_WORDS] and rejects text reaching [ForbiddenWords::max].
pub struct ForbiddenWords {
    words: Vec<&'static str>,
    max: usize,
}

impl ForbiddenWords {
    pub fn with_max(max: usize) -> Self {
        Self {
            words: FORBIDDEN_WORDS.to_vec(),
            max,
        }
    }

    /// Combined number of occurrences of every forbidden word.
    pub fn count(&self, text: &str) -> usize {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in TOKEN.find_iter(&text.to_lowercase()) {
            *counts.entry(token.as_str().to_string()).or_default() += 1;
        }

        self.words
            .iter()
            .map(|word| counts.get(*word).copied().unwrap_or_default())
            .sum()
    }
}

impl Default for ForbiddenWords {
    fn default() -> Self {
        Self::with_max(FORBIDDEN_WORDS_MAX)
    }
}

impl Filter<&str> for ForbiddenWords {
    fn detect(&self, text: &str) -> bool {
        self.count(text) < self.max
    }
}

pub fn has_minimum_word_count(text: &str, min_words: usize) -> bool {
    WordCount::with_min_words(min_words).detect(text)
}

pub fn should_include_answer(answer: &str) -> bool {
    Completeness::default().detect(answer)
}

pub fn has_forbidden_words(answer: &str) -> bool {
    !ForbiddenWords::default().detect(answer)
}
