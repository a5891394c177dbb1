//! Destinations of accepted records.
//!
//! Chunks run concurrently and persist through a shared reference to a [RecordSink].
use std::sync::Mutex;

use log::debug;

use super::writer::WriterTrait;
use crate::error::Error;
use crate::pipelines::qa::QaRecord;

/// Somewhere accepted records of a chunk can be saved.
///
/// A chunk's records are persisted in a single call,
/// and implementations must not interleave records of concurrent calls.
pub trait RecordSink: Sync {
    fn persist(&self, chunk_id: usize, records: &[QaRecord]) -> Result<(), Error>;
}

/// Mutex-guarded writer: concurrent chunks are written one at a time.
pub struct SharedWriter<W> {
    writer: Mutex<W>,
}

impl<W> SharedWriter<W>
where
    W: WriterTrait<Item = QaRecord>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Number of records held by the underlying writer.
    pub fn len(&self) -> Result<usize, Error> {
        let w = self
            .writer
            .lock()
            .map_err(|e| Error::Custom(format!("poisoned writer: {e}")))?;
        Ok(w.len())
    }
}

impl<W> RecordSink for SharedWriter<W>
where
    W: WriterTrait<Item = QaRecord> + Send,
{
    fn persist(&self, chunk_id: usize, records: &[QaRecord]) -> Result<(), Error> {
        let mut w = self
            .writer
            .lock()
            .map_err(|e| Error::Custom(format!("poisoned writer: {e}")))?;
        w.write(records)?;
        debug!("chunk {}: {} records persisted", chunk_id, records.len());
        Ok(())
    }
}

/// In-memory sink, keeping track of the chunk each record comes from.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(usize, QaRecord)>>,
}

impl MemorySink {
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records ordered by chunk id, keeping the order of each chunk.
    pub fn into_sorted(self) -> Vec<QaRecord> {
        let mut records = self
            .records
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        records.sort_by_key(|(chunk_id, _)| *chunk_id);
        records.into_iter().map(|(_, record)| record).collect()
    }
}

impl RecordSink for MemorySink {
    fn persist(&self, chunk_id: usize, records: &[QaRecord]) -> Result<(), Error> {
        let mut r = self
            .records
            .lock()
            .map_err(|e| Error::Custom(format!("poisoned sink: {e}")))?;
        r.extend(records.iter().cloned().map(|record| (chunk_id, record)));
        Ok(())
    }
}
