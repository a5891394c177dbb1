/*!
# IO utilities

Raw record loading ([reader]), accepted record saving ([writer])
and the [RecordSink] chunks persist their records through.
!*/
pub mod reader;
mod sink;
pub mod writer;

pub use reader::{read_records, Ingested, JsonlReader};
pub use sink::{MemorySink, RecordSink, SharedWriter};
pub use writer::{JsonArrayWriter, WriterTrait};
