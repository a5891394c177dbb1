//! Chunked dispatching.
//!
//! Records are split in contiguous chunks of a fixed size that are processed concurrently on the rayon pool.
//! Chunks share nothing but the [RecordSink] their accepted records are persisted through.
use std::collections::BTreeMap;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use super::cascade::Cascade;
use super::types::{QaRecord, RawRecord, RejectReason, Verdict};
use crate::error::Error;
use crate::filtering::dedup::Dedup;
use crate::filtering::FilterMut;
use crate::io::RecordSink;

/// What happened to a chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkReport {
    pub chunk_id: usize,
    pub records: usize,
    pub accepted: usize,
    /// records whose processing failed
    pub errors: usize,
    pub rejections: BTreeMap<RejectReason, usize>,
    /// `false` if the accepted records could not be persisted.
    pub persisted: bool,
}

/// Aggregation of [ChunkReport]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub chunks: usize,
    pub records: usize,
    /// lines skipped at ingestion
    pub skipped_lines: usize,
    pub accepted: usize,
    /// accepted records that made it to the sink
    pub persisted: usize,
    pub errors: usize,
    pub rejections: BTreeMap<RejectReason, usize>,
    pub failed_chunks: Vec<usize>,
}

impl RunReport {
    pub fn from_chunks(reports: &[ChunkReport]) -> Self {
        let mut run = RunReport {
            chunks: reports.len(),
            ..Default::default()
        };

        for report in reports {
            run.records += report.records;
            run.accepted += report.accepted;
            run.errors += report.errors;
            for (reason, count) in &report.rejections {
                *run.rejections.entry(*reason).or_default() += count;
            }
            if report.persisted {
                run.persisted += report.accepted;
            } else {
                run.failed_chunks.push(report.chunk_id);
            }
        }

        run.failed_chunks.sort_unstable();
        run
    }

    /// `true` if every accepted record has been persisted.
    pub fn is_complete(&self) -> bool {
        self.failed_chunks.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// Logs totals and rejection reasons.
    pub fn log(&self) {
        info!(
            "{} records in {} chunks: {} accepted, {} rejected, {} errors ({} lines skipped at ingestion)",
            self.records,
            self.chunks,
            self.accepted,
            self.rejected(),
            self.errors,
            self.skipped_lines
        );
        for (reason, count) in &self.rejections {
            info!("rejected [{}]: {}", reason, count);
        }
    }
}

/// Splits records in chunks, runs the [Cascade] on each chunk concurrently
/// and persists accepted records chunk by chunk.
pub struct Dispatcher {
    cascade: Cascade,
    chunk_size: usize,
}

impl Dispatcher {
    /// Errors if `chunk_size` is 0.
    pub fn new(cascade: Cascade, chunk_size: usize) -> Result<Self, Error> {
        if chunk_size == 0 {
            return Err(Error::Custom("chunk size must be at least 1".to_string()));
        }
        Ok(Self {
            cascade,
            chunk_size,
        })
    }

    /// Chunk rng. Seeded runs are reproducible whatever the scheduling.
    fn rng(&self, chunk_id: usize) -> StdRng {
        match self.cascade.config().seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(chunk_id as u64)),
            None => StdRng::from_entropy(),
        }
    }

    /// Process a chunk.
    ///
    /// Records are processed in order, failures are logged and skipped.
    /// Returns accepted records (in input order) along with the chunk report.
    /// The report's `persisted` flag is left to `true`.
    pub fn process_chunk(&self, chunk_id: usize, chunk: &[RawRecord]) -> (Vec<QaRecord>, ChunkReport) {
        let mut rng = self.rng(chunk_id);
        let mut dedup = Dedup::default();
        let mut report = ChunkReport {
            chunk_id,
            records: chunk.len(),
            persisted: true,
            ..Default::default()
        };

        let mut accepted = Vec::new();
        for (idx, record) in chunk.iter().enumerate() {
            match self.cascade.process_with(record, &mut rng) {
                Ok(Verdict::Accepted(qa)) => {
                    if self.cascade.config().dedup
                        && !dedup.detect_mut((qa.question.as_str(), qa.answer.as_str()))
                    {
                        *report.rejections.entry(RejectReason::Duplicate).or_default() += 1;
                        continue;
                    }
                    accepted.push(qa);
                }
                Ok(Verdict::Rejected(reason)) => {
                    *report.rejections.entry(reason).or_default() += 1;
                }
                Err(e) => {
                    error!("chunk {} record {}: {:?}", chunk_id, idx, e);
                    report.errors += 1;
                }
            }
        }

        report.accepted = accepted.len();
        (accepted, report)
    }

    /// Dispatch every chunk of `records` on the current rayon pool.
    ///
    /// Persistence failures do not stop other chunks: the failing chunk is flagged in its report.
    /// Reports are returned sorted by chunk id.
    pub fn dispatch<S: RecordSink>(&self, records: &[RawRecord], sink: &S) -> Vec<ChunkReport> {
        let mut reports: Vec<ChunkReport> = records
            .par_chunks(self.chunk_size)
            .enumerate()
            .map(|(chunk_id, chunk)| {
                let (accepted, mut report) = self.process_chunk(chunk_id, chunk);
                debug!(
                    "chunk {}: {}/{} accepted",
                    chunk_id,
                    report.accepted,
                    report.records
                );

                if !accepted.is_empty() {
                    if let Err(e) = sink.persist(chunk_id, &accepted) {
                        error!("chunk {}: could not persist records: {:?}", chunk_id, e);
                        report.persisted = false;
                    }
                }
                report
            })
            .collect();

        reports.sort_by_key(|report| report.chunk_id);
        reports
    }

    /// Dispatch and aggregate.
    pub fn run<S: RecordSink>(&self, records: &[RawRecord], sink: &S) -> RunReport {
        RunReport::from_chunks(&self.dispatch(records, sink))
    }
}
