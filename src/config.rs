//! Thresholds and defaults.
//!
//! Constants are the defaults the command line falls back to.
//! [CascadeConfig] bundles the ones that drive the filter cascade so that they can be
//! overridden per run.

/// Minimum number of whitespace-separated words of an input.
pub const LOWER_WORD_THRESHOLD: usize = 6;

/// Declared upper bound on word counts.
/// No filter reads it, it is kept as a knob in [CascadeConfig].
pub const UPPER_WORD_THRESHOLD: usize = 400;

/// Targets with strictly more words than this are considered long.
pub const LONG_TARGET_WORDS: usize = 200;

/// Number of target words appended to a short input when the target is long.
pub const AUGMENT_WORDS: usize = 5;

/// Share of answer words found in the input above which a pair is redundant.
pub const REDUNDANCY_THRESHOLD: f64 = 0.6;

/// Targets must be at least this many times longer (in characters) than their input.
pub const DOUBLE_SIZE_FACTOR: f64 = 2.0;

/// Share of context words found in the answer above which contexts get truncated.
pub const CONTEXT_OVERLAP_THRESHOLD: f64 = 0.5;

/// Number of words kept at each end of a truncated context.
pub const CONTEXT_KEEP_WORDS: usize = 3;

/// Number of forbidden word occurrences that gets a target rejected.
pub const FORBIDDEN_WORDS_MAX: usize = 2;

pub const DEFAULT_CHUNK_SIZE: usize = 50;

pub const DEFAULT_OUTPUT: &str = "qa_dataset.json";

/// Parameters of the record filter cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeConfig {
    pub min_words: usize,
    pub max_words: usize,
    pub long_target_words: usize,
    pub augment_words: usize,
    pub redundancy_threshold: f64,
    pub double_size_factor: f64,
    pub context_overlap_threshold: f64,
    pub forbidden_words_max: usize,
    /// drop records repeating a (question, answer) pair already emitted by the chunk.
    pub dedup: bool,
    /// seed for context template selection. Unseeded runs use entropy.
    pub seed: Option<u64>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_words: LOWER_WORD_THRESHOLD,
            max_words: UPPER_WORD_THRESHOLD,
            long_target_words: LONG_TARGET_WORDS,
            augment_words: AUGMENT_WORDS,
            redundancy_threshold: REDUNDANCY_THRESHOLD,
            double_size_factor: DOUBLE_SIZE_FACTOR,
            context_overlap_threshold: CONTEXT_OVERLAP_THRESHOLD,
            forbidden_words_max: FORBIDDEN_WORDS_MAX,
            dedup: false,
            seed: None,
        }
    }
}
