/*! Input/target to question/context/answer pipeline

Raw records are read from a JSONL file, split in chunks that are processed concurrently,
and accepted records are appended to a JSON array file.

# Processing

For each record of a chunk ([Cascade]):
1. Input and target are normalized ([crate::transformers::Normalizer]).
1. Records with an empty target (or input) are dropped.
1. Long targets get their input augmented into a question.
1. The pair goes through the [crate::filtering::QualityGate].
1. Accepted pairs get a context ([crate::context::ContextSynthesizer]) and become a [QaRecord].

Chunks are dispatched by the [Dispatcher], which persists each chunk's records through a
[crate::io::RecordSink] as soon as the chunk is done.
!*/
mod cascade;
mod dispatch;
mod pipeline;
mod types;

pub use cascade::{to_question, Cascade};
pub use dispatch::{ChunkReport, Dispatcher, RunReport};
pub use pipeline::QaPipeline;
pub use types::{QaRecord, RawRecord, RejectReason, Verdict};
