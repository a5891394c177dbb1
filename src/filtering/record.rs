//! Input/target pair filtering.
//!
//! Filters here take `(input, target)` tuples.
use std::collections::HashSet;

use super::Filter;
use crate::config::{DOUBLE_SIZE_FACTOR, REDUNDANCY_THRESHOLD};

/// Target length filter.
///
/// Keeps pairs whose target is at least [DoubleSize::factor] times longer than the input.
/// Lengths are counted in Unicode codepoints, not in words.
pub struct DoubleSize {
    factor: f64,
}

impl DoubleSize {
    pub fn with_factor(factor: f64) -> Self {
        Self { factor }
    }
}

impl Default for DoubleSize {
    fn default() -> Self {
        Self::with_factor(DOUBLE_SIZE_FACTOR)
    }
}

impl Filter<(&str, &str)> for DoubleSize {
    fn detect(&self, (input, target): (&str, &str)) -> bool {
        let input_len = input.chars().count() as f64;
        let target_len = target.chars().count() as f64;
        target_len >= self.factor * input_len
    }
}

/// Redundancy filter.
///
/// Computes the share of target words (lowercased, whitespace-separated, with repetitions)
/// that also appear in the input, and rejects pairs where that share reaches [Redundancy::threshold].
/// A target without words is always considered redundant.
pub struct Redundancy {
    threshold: f64,
}

impl Redundancy {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Share of target words present in the input.
    /// Returns `None` if the target has no words.
    pub fn overlap(input: &str, target: &str) -> Option<f64> {
        let input = input.to_lowercase();
        let input_words: HashSet<&str> = input.split_whitespace().collect();

        let target = target.to_lowercase();
        let (total, common) = target
            .split_whitespace()
            .fold((0usize, 0usize), |(total, common), word| {
                (total + 1, common + usize::from(input_words.contains(word)))
            });

        if total == 0 {
            None
        } else {
            Some(common as f64 / total as f64)
        }
    }
}

impl Default for Redundancy {
    fn default() -> Self {
        Self::with_threshold(REDUNDANCY_THRESHOLD)
    }
}

impl Filter<(&str, &str)> for Redundancy {
    fn detect(&self, (input, target): (&str, &str)) -> bool {
        match Self::overlap(input, target) {
            Some(ratio) => ratio < self.threshold,
            None => false,
        }
    }
}

pub fn is_target_double_size(input: &str, target: &str) -> bool {
    DoubleSize::default().detect((input, target))
}

pub fn is_overly_redundant(input: &str, target: &str) -> bool {
    !Redundancy::default().detect((input, target))
}
