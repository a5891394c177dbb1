//! QA cleaning pipeline.
//!
//! Reads a JSONL file of raw records, runs the [Cascade] on chunks of records concurrently
//! and appends accepted records to a JSON array file.
use std::path::PathBuf;

use log::{debug, info, warn};

use super::cascade::Cascade;
use super::dispatch::{Dispatcher, RunReport};
use crate::config::{CascadeConfig, DEFAULT_CHUNK_SIZE};
use crate::error::Error;
use crate::io::{read_records, JsonArrayWriter, SharedWriter, WriterTrait};
use crate::pipelines::pipeline::Pipeline;

pub struct QaPipeline {
    src: PathBuf,
    dst: PathBuf,
    config: CascadeConfig,
    chunk_size: usize,
    threads: Option<usize>,
    repair: bool,
}

impl QaPipeline {
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self {
            src,
            dst,
            config: CascadeConfig::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: None,
            repair: false,
        }
    }

    pub fn with_config(mut self, config: CascadeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Run on a dedicated pool of `threads` threads instead of the global one.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Attempt to repair undecodable lines.
    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair = repair;
        self
    }
}

impl Pipeline<RunReport> for QaPipeline {
    /// Runs the pipeline.
    ///
    /// Persistence failures of individual chunks do not make this fail:
    /// check [RunReport::is_complete].
    fn run(&self) -> Result<RunReport, Error> {
        let dispatcher = Dispatcher::new(Cascade::new(self.config.clone()), self.chunk_size)?;

        let ingested = read_records(&self.src, self.repair)?;
        info!(
            "{:?}: {} records loaded, {} lines skipped",
            self.src,
            ingested.records.len(),
            ingested.skipped
        );

        if let Some(parent) = self.dst.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                warn!("Destination directory does not exist. Creating");
                std::fs::create_dir_all(parent)?;
            }
        }

        let writer = JsonArrayWriter::new(&self.dst)?;
        if !writer.is_empty() {
            info!("{:?}: appending to {} existing records", self.dst, writer.len());
        }
        let sink = SharedWriter::new(writer);

        let mut report = match self.threads {
            Some(threads) => {
                debug!("using a dedicated pool of {} threads", threads);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                pool.install(|| dispatcher.run(&ingested.records, &sink))
            }
            None => dispatcher.run(&ingested.records, &sink),
        };

        report.skipped_lines = ingested.skipped;
        report.log();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::pipelines::qa::QaRecord;

    const GOOD: &str = r#"{"input": "what does the word feline mean", "value": "Feline refers to cats and other members of their biological family, which are carnivores."}"#;
    const BAD: &str = r#"{"input": "too short", "value": "no."}"#;

    #[test]
    fn run() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.jsonl");
        let dst = dir.path().join("out").join("qa.json");
        fs::write(&src, [GOOD, BAD, "{broken", GOOD].join("\n")).unwrap();

        let report = QaPipeline::new(src, dst.clone())
            .with_chunk_size(2)
            .with_threads(Some(2))
            .run()
            .unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.accepted, 2);
        assert!(report.is_complete());

        let written: Vec<QaRecord> = serde_json::from_str(&fs::read_to_string(&dst).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
    }

    #[test]
    fn zero_chunk_size() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.jsonl");
        fs::write(&src, GOOD).unwrap();
        let p = QaPipeline::new(src, dir.path().join("qa.json")).with_chunk_size(0);
        assert!(p.run().is_err());
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let p = QaPipeline::new(dir.path().join("nope.jsonl"), dir.path().join("qa.json"));
        assert!(matches!(p.run(), Err(Error::Io(_))));
    }
}
