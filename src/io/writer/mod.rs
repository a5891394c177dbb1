/*!
# File based writing

Accepted records are saved in a single JSON array file by [JsonArrayWriter].
The file is a valid JSON document after each write, so that an interrupted run leaves a usable dataset.

Writers are not thread-safe: concurrent chunks go through [crate::io::SharedWriter].
!*/
mod json_array;
mod writertrait;

pub use json_array::JsonArrayWriter;
pub use writertrait::WriterTrait;
