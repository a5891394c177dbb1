//! Records going in and out of the pipeline.
use serde::{Deserialize, Serialize};

pub use crate::filtering::RejectReason;

/// A scraped record.
///
/// The answer side can be named either `value` or `target`, `value` taking precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RawRecord {
    pub fn new(input: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            value: Some(value.into()),
            target: None,
        }
    }

    /// Get the answer side of the record, preferring `value` over `target`.
    pub fn target(&self) -> Option<&str> {
        self.value.as_deref().or(self.target.as_deref())
    }
}

/// An accepted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub context: String,
    pub answer: String,
}

/// Outcome of the cascade for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(QaRecord),
    Rejected(RejectReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_takes_precedence() {
        let r: RawRecord =
            serde_json::from_str(r#"{"input": "q", "target": "t", "value": "v"}"#).unwrap();
        assert_eq!(r.target(), Some("v"));

        let r: RawRecord = serde_json::from_str(r#"{"input": "q", "target": "t"}"#).unwrap();
        assert_eq!(r.target(), Some("t"));

        let r: RawRecord = serde_json::from_str(r#"{"input": "q"}"#).unwrap();
        assert_eq!(r.target(), None);
    }

    #[test]
    fn input_is_required() {
        assert!(serde_json::from_str::<RawRecord>(r#"{"value": "v"}"#).is_err());
    }

    #[test]
    fn qa_record_field_order() {
        let r = QaRecord {
            question: "q?".to_string(),
            context: "c".to_string(),
            answer: "a".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"question":"q?","context":"c","answer":"a"}"#
        );
    }
}
