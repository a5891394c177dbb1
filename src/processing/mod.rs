/*! Dataset processing

Operations on already produced datasets.
!*/
pub mod check;

pub use check::{check_file, check_record, CheckReport, Violation};
