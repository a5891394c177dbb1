//! Normalization chain.
use log::debug;

use super::{
    AllowedCharset, CollapseWhitespace, LeadingNumbers, NewlinesToSpaces, RepeatedWords,
    StripUrls, Transform,
};

/// Normalizer enables transform chaining, applying every added [Transform] in insertion order.
///
/// The [Default] normalizer holds the cleaning chain used on both inputs and targets.
pub struct Normalizer(Vec<Box<dyn Transform + Sync + Send>>);

impl Normalizer {
    /// Creates a normalizer without any transform.
    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn add(&mut self, transform: Box<dyn Transform + Sync + Send>) -> &mut Normalizer {
        self.0.push(transform);
        self
    }

    /// Runs the chain until the text does not change anymore.
    ///
    /// A single pass can leave work for a next one (removing a disallowed character can
    /// glue two identical words together), so passes are repeated to guarantee that
    /// `normalize(normalize(x)) == normalize(x)`.
    /// After the first pass no transform can grow the text, which bounds the loop.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.transform_own(text.to_string());
        let mut passes = 1;
        loop {
            let next = self.transform_own(current.clone());
            if next == current {
                break;
            }
            current = next;
            passes += 1;
        }

        if passes > 2 {
            debug!("normalization stabilized after {} passes", passes);
        }
        current
    }
}

impl Transform for Normalizer {
    fn transform_own(&self, text: String) -> String {
        self.0
            .iter()
            .fold(text, |text, transform| transform.transform_own(text))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        let mut normalizer = Self::empty();
        normalizer
            .add(Box::<NewlinesToSpaces>::default())
            .add(Box::<StripUrls>::default())
            .add(Box::<CollapseWhitespace>::default())
            .add(Box::<AllowedCharset>::default())
            .add(Box::<RepeatedWords>::default())
            .add(Box::<LeadingNumbers>::default());
        normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::Normalizer;
    use crate::transformers::Transform;

    #[test]
    fn full_chain() {
        let n = Normalizer::default();
        let text = "12  Visit https://example.com\nfor the the\tbest 😀 deals";
        assert_eq!(n.normalize(text), "Visit for the best deals");
    }

    #[test]
    fn empty_after_cleaning() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("  https://only.url \n 😀 "), "");
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn idempotent() {
        let n = Normalizer::default();
        let texts = [
            "the the the cat",
            "the😀 the cat",
            "1 2 3 4 numbers first",
            "  spaces   😀 around  ",
            "http😀://hidden.url after",
            "word\r\nword\nword",
            "नमस्ते 😀 नमस्ते। ॥",
            "7 7 seven",
            "?? what is this ??",
            "",
        ];
        for text in texts {
            let once = n.normalize(text);
            let twice = n.normalize(&once);
            assert_eq!(once, twice, "normalization of {:?} is not idempotent", text);
        }
    }

    #[test]
    fn single_pass_order() {
        // a single pass leaves the space created by the charset filter
        let n = Normalizer::default();
        assert_eq!(n.transform_own("a 😀 b".to_string()), "a  b");
        assert_eq!(n.normalize("a 😀 b"), "a b");
    }

    #[test]
    fn custom_chain() {
        let mut n = Normalizer::empty();
        n.add(Box::<crate::transformers::RepeatedWords>::default());
        assert_eq!(n.normalize("go go  http://a.b"), "go  http://a.b");
    }
}

#[cfg(test)]
mod proptests {
    use super::Normalizer;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn idempotent_on_any_string(text in "\\PC*") {
            let n = Normalizer::default();
            let once = n.normalize(&text);
            prop_assert_eq!(n.normalize(&once), once);
        }

        // word-heavy inputs, more likely to hit repetitions, numbers and urls
        #[test]
        fn idempotent_on_wordy_strings(
            text in "((the|7|http://a\\.b|😀|नमस्ते|।|\\?)[ \\n\\t]{0,2}){0,12}"
        ) {
            let n = Normalizer::default();
            let once = n.normalize(&text);
            prop_assert_eq!(n.normalize(&once), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
