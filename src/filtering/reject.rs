//! Rejection reasons.
use std::fmt;

use serde::Serialize;

/// Why a record was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RejectReason {
    EmptyInput,
    EmptyTarget,
    TooFewWords,
    TargetTooShort,
    IncompleteAnswer,
    ForbiddenWords,
    Redundant,
    Duplicate,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::EmptyTarget => "empty_target",
            Self::TooFewWords => "too_few_words",
            Self::TargetTooShort => "target_too_short",
            Self::IncompleteAnswer => "incomplete_answer",
            Self::ForbiddenWords => "forbidden_words",
            Self::Redundant => "redundant",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
