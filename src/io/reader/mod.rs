/*! Record reading utilities

Raw records come from JSONL files: one JSON object per line.
!*/
mod jsonl;

pub use jsonl::{clean_line, read_records, repair_line, Ingested, JsonlReader};
