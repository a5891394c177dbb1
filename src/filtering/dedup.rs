//! Chunk-local deduplication.
use std::collections::HashSet;

use super::FilterMut;

/// Remembers every `(question, answer)` pair it sees.
///
/// Returns `false` for pairs already seen. Holds state, so one instance is used per chunk.
#[derive(Default)]
pub struct Dedup {
    seen: HashSet<(String, String)>,
}

impl Dedup {
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl FilterMut<(&str, &str)> for Dedup {
    fn detect_mut(&mut self, (question, answer): (&str, &str)) -> bool {
        self.seen
            .insert((question.trim().to_string(), answer.trim().to_string()))
    }
}
