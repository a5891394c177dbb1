//! Collapses immediately repeated words.
//!
//! `the the cat` becomes `the cat`. Words are maximal runs of Unicode word characters,
//! comparison is case-sensitive and a repetition only counts when the two words are
//! separated by whitespace alone. A run of repetitions collapses into a single word.
use lazy_static::lazy_static;
use regex::Regex;

use super::Transform;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// Collapses `word word` into `word`.
///
/// ```
/// use qasieve::transformers::remove_repeated_words;
///
/// assert_eq!(remove_repeated_words("the the cat cat sat"), "the cat sat");
/// ```
pub fn remove_repeated_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    // end of the last word (kept or not)
    let mut last_end = 0;
    let mut previous: Option<&str> = None;

    for word in WORD.find_iter(text) {
        let gap = &text[last_end..word.start()];
        let repeated = previous == Some(word.as_str())
            && !gap.is_empty()
            && gap.chars().all(char::is_whitespace);

        if !repeated {
            out.push_str(gap);
            out.push_str(word.as_str());
            previous = Some(word.as_str());
        }
        last_end = word.end();
    }

    out.push_str(&text[last_end..]);
    out
}

#[derive(Default)]
pub struct RepeatedWords;

impl Transform for RepeatedWords {
    fn transform_own(&self, text: String) -> String {
        remove_repeated_words(&text)
    }
}
