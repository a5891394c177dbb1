//! Whitespace, URL and leading number cleaning.
use lazy_static::lazy_static;
use regex::Regex;

use super::Transform;

lazy_static! {
    static ref URL: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref LEADING_NUMBERS: Regex = Regex::new(r"^(?:\d+\s*)+").unwrap();
}

/// Removes `http://` and `https://` URLs, up to the next whitespace.
pub fn remove_urls(text: &str) -> String {
    URL.replace_all(text, "").into_owned()
}

/// Replaces every whitespace run by a single space, then trims.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Strips digits (and the whitespace that follows them) at the start of the text.
///
/// ```
/// use qasieve::transformers::remove_leading_numbers;
///
/// assert_eq!(remove_leading_numbers("42 hello world"), "hello world");
/// assert_eq!(remove_leading_numbers("hello 42 world"), "hello 42 world");
/// ```
pub fn remove_leading_numbers(text: &str) -> String {
    LEADING_NUMBERS.replace(text, "").into_owned()
}

/// Replaces line feeds and carriage returns by spaces.
#[derive(Default)]
pub struct NewlinesToSpaces;

impl Transform for NewlinesToSpaces {
    fn transform_own(&self, text: String) -> String {
        if text.contains(['\n', '\r']) {
            text.replace(['\n', '\r'], " ")
        } else {
            text
        }
    }
}

#[derive(Default)]
pub struct StripUrls;

impl Transform for StripUrls {
    fn transform_own(&self, text: String) -> String {
        remove_urls(&text)
    }
}

#[derive(Default)]
pub struct CollapseWhitespace;

impl Transform for CollapseWhitespace {
    fn transform_own(&self, text: String) -> String {
        collapse_whitespace(&text)
    }
}

#[derive(Default)]
pub struct LeadingNumbers;

impl Transform for LeadingNumbers {
    fn transform_own(&self, text: String) -> String {
        remove_leading_numbers(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines() {
        let t = NewlinesToSpaces::default();
        assert_eq!(t.transform_own("a\nb\r\nc".to_string()), "a b  c");
    }

    #[test]
    fn urls() {
        assert_eq!(
            remove_urls("see https://example.com/a?b=c and http://x.org."),
            "see  and "
        );
        assert_eq!(remove_urls("ftp://example.com"), "ftp://example.com");
    }

    #[test]
    fn whitespace() {
        assert_eq!(collapse_whitespace("  a \t\t b\u{2003}c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn leading_numbers() {
        assert_eq!(remove_leading_numbers("42 hello world"), "hello world");
        assert_eq!(remove_leading_numbers("123Some text"), "Some text");
        assert_eq!(remove_leading_numbers("1 2 3 go"), "go");
        assert_eq!(remove_leading_numbers("hello 42 world"), "hello 42 world");
        assert_eq!(remove_leading_numbers("2024"), "");
    }
}
