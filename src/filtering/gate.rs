//! Quality gate: the conjunction of every stateless filter.
use super::{
    answer::{Completeness, ForbiddenWords, WordCount},
    record::{DoubleSize, Redundancy},
    Filter, RejectReason,
};
use crate::config::CascadeConfig;

/// Holds the filters a pair has to pass, evaluated in this order:
///
/// 1. input word count ([WordCount])
/// 1. target/input length ratio ([DoubleSize])
/// 1. target completeness ([Completeness])
/// 1. forbidden words in target ([ForbiddenWords])
/// 1. redundancy between input and target ([Redundancy])
///
/// Evaluation stops at the first failing filter.
pub struct QualityGate {
    word_count: WordCount,
    double_size: DoubleSize,
    completeness: Completeness,
    forbidden: ForbiddenWords,
    redundancy: Redundancy,
}

impl QualityGate {
    pub fn new(config: &CascadeConfig) -> Self {
        Self {
            word_count: WordCount::with_min_words(config.min_words),
            double_size: DoubleSize::with_factor(config.double_size_factor),
            completeness: Completeness::new(config.long_target_words),
            forbidden: ForbiddenWords::with_max(config.forbidden_words_max),
            redundancy: Redundancy::with_threshold(config.redundancy_threshold),
        }
    }

    /// Checks an `(input, target)` pair, returning the reason of the first failing filter.
    pub fn check(&self, input: &str, target: &str) -> Result<(), RejectReason> {
        if !self.word_count.detect(input) {
            return Err(RejectReason::TooFewWords);
        }
        if !self.double_size.detect((input, target)) {
            return Err(RejectReason::TargetTooShort);
        }
        if !self.completeness.detect(target) {
            return Err(RejectReason::IncompleteAnswer);
        }
        if !self.forbidden.detect(target) {
            return Err(RejectReason::ForbiddenWords);
        }
        if !self.redundancy.detect((input, target)) {
            return Err(RejectReason::Redundant);
        }
        Ok(())
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(&CascadeConfig::default())
    }
}

impl Filter<(&str, &str)> for QualityGate {
    fn detect(&self, (input, target): (&str, &str)) -> bool {
        self.check(input, target).is_ok()
    }
}
