//! Character allow-list.
//!
//! Keeps ASCII, the Devanagari, Bengali, Gurmukhi, Tamil and Kannada blocks,
//! the General Punctuation block and the danda/double danda sentence terminators.
//! Anything else (emojis, CJK, Latin-1 supplement...) is dropped.
use super::Transform;

/// Returns `true` if `c` belongs to the allow-list.
#[inline]
pub fn is_allowed(c: char) -> bool {
    matches!(c,
        '\u{0000}'..='\u{007F}'
        | '\u{0900}'..='\u{097F}'
        | '\u{0980}'..='\u{09FF}'
        | '\u{0A00}'..='\u{0A7F}'
        | '\u{0B80}'..='\u{0BFF}'
        | '\u{0C80}'..='\u{0CFF}'
        | '\u{2000}'..='\u{206F}'
        | '।'
        | '॥'
    )
}

/// Removes every character outside of the allow-list.
pub fn clean_special_characters(text: &str) -> String {
    text.chars().filter(|c| is_allowed(*c)).collect()
}

#[derive(Default)]
pub struct AllowedCharset;

impl Transform for AllowedCharset {
    fn transform_own(&self, text: String) -> String {
        if text.chars().all(is_allowed) {
            text
        } else {
            clean_special_characters(&text)
        }
    }
}
