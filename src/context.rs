/*! Context synthesis.

Accepted answers get a supporting sentence built from one of five templates, picked at random.
When most of the generated context is made of answer words, it is shortened to its first and last words.
!*/
use std::collections::HashSet;

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{CONTEXT_KEEP_WORDS, CONTEXT_OVERLAP_THRESHOLD};

/// Context templates, as `(prefix, suffix)` pairs surrounding the answer.
pub const TEMPLATES: [(&str, &str); 5] = [
    ("This is a definition: ", ""),
    ("The following statement is true: ", ""),
    ("Here is some information: ", ""),
    ("In this context, ", " is the answer."),
    ("The explanation for this is: ", ""),
];

/// Builds a context embedding `target` in a template chosen by `rng`.
pub fn generate_context<R: Rng + ?Sized>(target: &str, rng: &mut R) -> String {
    // TEMPLATES is not empty
    let (prefix, suffix) = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    format!("{prefix}{target}{suffix}")
}

/// Returns `true` if `context` could have been generated from `target` by [generate_context].
pub fn is_template_shape(context: &str, target: &str) -> bool {
    TEMPLATES
        .iter()
        .any(|(prefix, suffix)| context == format!("{prefix}{target}{suffix}"))
}

/// Shortens `context` when it overlaps too much with `answer`.
///
/// If the share of context words (case-insensitive, whitespace-separated) found in the answer
/// is above `threshold` *and* the context has more than 6 words, only the first 3 and the last 3 words are kept.
/// Other contexts are returned unchanged.
pub fn truncate_context(context: &str, answer: &str, threshold: f64) -> String {
    truncate_with(context, answer, threshold, CONTEXT_KEEP_WORDS)
}

fn truncate_with(context: &str, answer: &str, threshold: f64, keep: usize) -> String {
    let context_words: Vec<&str> = context.split_whitespace().collect();
    if context_words.is_empty() {
        return context.to_string();
    }

    let answer_words: HashSet<String> = answer
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect();

    let common = context_words
        .iter()
        .filter(|word| answer_words.contains(&word.to_lowercase()))
        .count();
    let ratio = common as f64 / context_words.len() as f64;

    if ratio > threshold && context_words.len() > 2 * keep {
        context_words[..keep]
            .iter()
            .chain(&context_words[context_words.len() - keep..])
            .join(" ")
    } else {
        context.to_string()
    }
}

/// Generates then truncates contexts.
pub struct ContextSynthesizer {
    threshold: f64,
}

impl ContextSynthesizer {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, answer: &str, rng: &mut R) -> String {
        let context = generate_context(answer, rng);
        truncate_context(&context, answer, self.threshold)
    }
}

impl Default for ContextSynthesizer {
    fn default() -> Self {
        Self::with_threshold(CONTEXT_OVERLAP_THRESHOLD)
    }
}
