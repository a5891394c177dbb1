//! This module deals with checking produced datasets.
//!
//! Every record of a dataset must have a non-empty question ending with `?`,
//! a non-empty context and a non-empty answer.
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;

use crate::error::Error;
use crate::pipelines::qa::QaRecord;

/// Ways a record can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Violation {
    EmptyQuestion,
    NotAQuestion,
    EmptyContext,
    EmptyAnswer,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptyQuestion => "empty question",
            Self::NotAQuestion => "question does not end with '?'",
            Self::EmptyContext => "empty context",
            Self::EmptyAnswer => "empty answer",
        };
        f.write_str(s)
    }
}

/// Lists the violations of a record. Empty if the record is valid.
pub fn check_record(record: &QaRecord) -> Vec<Violation> {
    let mut violations = Vec::new();
    if record.question.trim().is_empty() {
        violations.push(Violation::EmptyQuestion);
    } else if !record.question.ends_with('?') {
        violations.push(Violation::NotAQuestion);
    }
    if record.context.trim().is_empty() {
        violations.push(Violation::EmptyContext);
    }
    if record.answer.trim().is_empty() {
        violations.push(Violation::EmptyAnswer);
    }
    violations
}

/// Outcome of a dataset check.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub records: usize,
    /// record index and violations of invalid records
    pub invalid: Vec<(usize, Vec<Violation>)>,
}

impl CheckReport {
    pub fn from_records(records: &[QaRecord]) -> Self {
        let invalid = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx, check_record(record)))
            .filter(|(_, violations)| !violations.is_empty())
            .collect();

        Self {
            records: records.len(),
            invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn log(&self) {
        info!(
            "{} records, {} invalid",
            self.records,
            self.invalid.len()
        );
        for (idx, violations) in &self.invalid {
            warn!("record {}: {}", idx, violations.iter().join(", "));
        }
    }
}

/// Checks a JSON array dataset file.
pub fn check_file(path: &Path) -> Result<CheckReport, Error> {
    let f = BufReader::new(File::open(path)?);
    let records: Vec<QaRecord> = serde_json::from_reader(f)?;
    Ok(CheckReport::from_records(&records))
}
