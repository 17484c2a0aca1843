//! Orchestration of the pipeline commands.
//!
//! This is the only layer that touches the filesystem, the reporter and the
//! progress store; it wires them around the pure builders and translators.

pub mod content;
pub mod dictionaries;
pub mod translations;

use std::path::Path;

/// Counters reported at the end of a translation or ingest run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records written.
    pub written: usize,
    /// Records left alone (already present or already completed).
    pub skipped: usize,
    /// Records that failed without stopping the run.
    pub problems: usize,
    /// Non-fatal gaps reported along the way (missing lenient lookups).
    pub warnings: usize,
}

/// File name of `path` for console lines.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
