//! Reading scraped JSONL input.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};

/// A line that could not be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number.
    pub line: usize,
    /// Decoder or validator message.
    pub reason: String,
}

/// Decoded lines of one JSONL file.
#[derive(Clone, Debug)]
pub struct JsonlBatch<T> {
    /// Successfully decoded entries in file order.
    pub entries: Vec<T>,
    /// Lines that failed to decode, in file order.
    pub rejected: Vec<RejectedLine>,
}

impl<T> Default for JsonlBatch<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// What: Decode JSONL text, keeping going past bad lines.
///
/// Inputs:
/// - `content`: Whole file content
/// - `check`: Validator run on each decoded entry
///
/// Output:
/// - `JsonlBatch` with decoded entries and rejected line numbers.
///
/// Details:
/// - Blank lines are skipped and do not count as rejected.
pub fn parse_jsonl<T, F>(content: &str, check: F) -> JsonlBatch<T>
where
    T: DeserializeOwned,
    F: Fn(&T) -> std::result::Result<(), String>,
{
    let mut batch = JsonlBatch::default();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(entry) => match check(&entry) {
                Ok(()) => batch.entries.push(entry),
                Err(reason) => batch.rejected.push(RejectedLine {
                    line: idx + 1,
                    reason,
                }),
            },
            Err(e) => batch.rejected.push(RejectedLine {
                line: idx + 1,
                reason: e.to_string(),
            }),
        }
    }
    batch
}

/// What: Read and decode a JSONL file if it exists.
///
/// Inputs:
/// - `path`: JSONL file
/// - `check`: Validator run on each decoded entry
///
/// Output:
/// - `Ok(None)` when the file does not exist, `Ok(Some(batch))` otherwise.
///
/// # Errors
/// - Returns `Err` when the file exists but cannot be read.
///
/// Details:
/// - Rejected lines are logged at warn level with their line numbers.
pub fn read_jsonl<T, F>(path: &Path, check: F) -> Result<Option<JsonlBatch<T>>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> std::result::Result<(), String>,
{
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let batch = parse_jsonl(&content, check);
    for rejected in &batch.rejected {
        tracing::warn!(
            path = %path.display(),
            line = rejected.line,
            reason = %rejected.reason,
            "skipping invalid JSONL line"
        );
    }
    Ok(Some(batch))
}
