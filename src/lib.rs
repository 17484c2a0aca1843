//! Library entry for the content pipeline: record store, term dictionaries,
//! dictionary-driven and automatic translation, and their orchestration.

pub mod dictionary;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod presence;
pub mod report;
pub mod settings;
pub mod sources;
pub mod store;
pub mod translate;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use error::{PipelineError, Result};
