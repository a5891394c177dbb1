//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by [qa::QaPipeline].
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod qa;

pub use pipeline::Pipeline;
pub use qa::QaPipeline;
