//! JSONL reader.
//!
//! Lines go through [clean_line] before being decoded.
//! Lines that can't be decoded into a [RawRecord], or that have no `value`/`target`,
//! are logged and skipped: reading only fails on I/O errors.
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::error::Error;
use crate::pipelines::qa::RawRecord;

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap();
    static ref BARE_KEY: Regex = Regex::new(r"([{,]\s*)([A-Za-z_]\w*)(\s*:)").unwrap();
    static ref TRAILING_COMMA: Regex = Regex::new(r",\s*([}\]])").unwrap();
}

/// Removes ASCII control characters, except tabs, line feeds and carriage returns.
pub fn clean_line(line: &str) -> Cow<'_, str> {
    CONTROL_CHARS.replace_all(line, "")
}

/// Conservative repair of common breakages: replacement characters become `'`,
/// escaped braces are unescaped, bare keys get quoted and trailing commas are removed.
///
/// ```
/// use qasieve::io::reader::repair_line;
///
/// assert_eq!(
///     repair_line(r#"{input: "q", value: "v",}"#),
///     r#"{"input": "q", "value": "v"}"#
/// );
/// ```
pub fn repair_line(line: &str) -> String {
    let line = line.replace('\u{FFFD}', "'");
    let line = line.replace(r"\{", "{").replace(r"\}", "}");
    let line = BARE_KEY.replace_all(&line, r#"${1}"${2}"${3}"#);
    TRAILING_COMMA.replace_all(&line, "${1}").into_owned()
}

/// Iterates over the records of a JSONL stream.
///
/// Yields errors on I/O failures only, malformed lines are counted in [JsonlReader::skipped].
pub struct JsonlReader<R> {
    reader: R,
    repair: bool,
    line_nb: usize,
    skipped: usize,
}

impl JsonlReader<BufReader<File>> {
    pub fn from_path(src: &Path, repair: bool) -> Result<Self, Error> {
        let f = File::open(src)?;
        Ok(Self::new(BufReader::new(f), repair))
    }
}

impl<R> JsonlReader<R>
where
    R: BufRead,
{
    pub fn new(reader: R, repair: bool) -> Self {
        Self {
            reader,
            repair,
            line_nb: 0,
            skipped: 0,
        }
    }

    /// Number of skipped (non-blank) lines so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Get next line (read until `\n`). Invalid UTF-8 is replaced.
    fn next_line(&mut self) -> Option<Result<String, Error>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Err(e) => Some(Err(Error::Io(e))),
            Ok(_) => {
                self.line_nb += 1;
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
        }
    }

    fn parse(&self, line: &str) -> Result<RawRecord, Error> {
        let line = clean_line(line);
        let record: RawRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) if self.repair => {
                debug!("line {}: attempting repair after {}", self.line_nb, e);
                serde_json::from_str(&repair_line(&line))?
            }
            Err(e) => return Err(e.into()),
        };

        if record.target().is_none() {
            return Err(Error::MissingField("value/target"));
        }
        Ok(record)
    }
}

impl<R> Iterator for JsonlReader<R>
where
    R: BufRead,
{
    type Item = Result<RawRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.parse(&line) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    warn!("skipping line {}: {:?}", self.line_nb, e);
                    self.skipped += 1;
                }
            }
        }
    }
}

/// Records loaded from a file, along with the number of skipped lines.
#[derive(Debug, Default)]
pub struct Ingested {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

/// Loads every valid record of a JSONL file in memory.
pub fn read_records(src: &Path, repair: bool) -> Result<Ingested, Error> {
    let mut reader = JsonlReader::from_path(src, repair)?;
    let records = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    Ok(Ingested {
        records,
        skipped: reader.skipped(),
    })
}
