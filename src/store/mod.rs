//! Flat-file record store: one JSON file per (manufacturer, language, kind, slug).
//!
//! There is no index. Listing a language directory is the only way to
//! enumerate records, and listings are sorted by file name so every stage
//! walks records in the same order on every platform.

pub mod jsonl;
pub mod layout;
pub mod scraped;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use layout::Layout;

use crate::error::{PipelineError, Result};
use crate::model::{EntityKind, Record};

/// How a write treats an existing file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Leave an existing file untouched (translation contexts).
    CreateIfAbsent,
    /// Replace an existing file (ingest, update, automatic retry).
    Overwrite,
}

/// What happened to a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written.
    Written,
    /// The file already existed and was left alone.
    Skipped,
}

/// What: Render a value as pretty JSON (2-space indent) with a trailing newline.
///
/// Inputs:
/// - `value`: Value to render
/// - `path`: File the text is destined for (error context only)
///
/// Output:
/// - JSON text.
///
/// # Errors
/// - Returns `Err` when serialization fails.
pub fn to_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<String> {
    let mut s = serde_json::to_string_pretty(value).map_err(|e| PipelineError::json(path, e))?;
    s.push('\n');
    Ok(s)
}

/// What: Write text to `path`, creating parent directories first.
///
/// Inputs:
/// - `path`: Destination file
/// - `body`: File content
/// - `mode`: Whether an existing file may be replaced
///
/// Output:
/// - `Written` or `Skipped`.
///
/// # Errors
/// - Returns `Err` when the directory or file cannot be written.
///
/// Details:
/// - `CreateIfAbsent` opens with `create_new`, so an existing file is never
///   truncated even if it appears between the check and the write.
pub fn write_text(path: &Path, body: &str, mode: WriteMode) -> Result<WriteOutcome> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    match mode {
        WriteMode::Overwrite => {
            fs::write(path, body).map_err(|e| PipelineError::io(path, e))?;
        }
        WriteMode::CreateIfAbsent => {
            let file = OpenOptions::new().write(true).create_new(true).open(path);
            match file {
                Ok(mut f) => f
                    .write_all(body.as_bytes())
                    .map_err(|e| PipelineError::io(path, e))?,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "record exists, leaving it untouched");
                    return Ok(WriteOutcome::Skipped);
                }
                Err(e) => return Err(PipelineError::io(path, e)),
            }
        }
    }
    Ok(WriteOutcome::Written)
}

/// What: List `*.json` files directly inside `dir`, sorted by file name.
///
/// Inputs:
/// - `dir`: Directory to list
///
/// Output:
/// - Sorted file paths; empty when `dir` does not exist.
///
/// # Errors
/// - Returns `Err` when `dir` exists but cannot be listed.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))? {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// What: Read and validate one record file.
///
/// Inputs:
/// - `path`: Record file
///
/// Output:
/// - The decoded record.
///
/// # Errors
/// - Returns `Err` on I/O failure, malformed JSON, or a failed validation.
pub fn read_record<R: Record>(path: &Path) -> Result<R> {
    let body = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let record: R = serde_json::from_str(&body).map_err(|e| PipelineError::json(path, e))?;
    record
        .validate()
        .map_err(|reason| PipelineError::InvalidRecord {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(record)
}

/// Record store bound to a layout.
#[derive(Clone, Debug)]
pub struct RecordStore {
    /// Directory layout.
    layout: Layout,
}

impl RecordStore {
    /// Bind a store to `layout`.
    #[must_use]
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Layout the store reads from.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Directory for one language's records of `kind`.
    #[must_use]
    pub fn dir(&self, kind: EntityKind, manufacturer: Option<&str>, lang: &str) -> PathBuf {
        self.layout.records_dir(kind, manufacturer, lang)
    }

    /// What: List record files of one language.
    ///
    /// # Errors
    /// - Returns `Err` when the directory exists but cannot be listed.
    pub fn list(
        &self,
        kind: EntityKind,
        manufacturer: Option<&str>,
        lang: &str,
    ) -> Result<Vec<PathBuf>> {
        list_json_files(&self.dir(kind, manufacturer, lang))
    }

    /// What: Read every record of one language in file-name order.
    ///
    /// # Errors
    /// - Returns `Err` on the first unreadable or invalid file.
    pub fn read_all<R: Record>(&self, manufacturer: Option<&str>, lang: &str) -> Result<Vec<R>> {
        self.list(R::KIND, manufacturer, lang)?
            .iter()
            .map(|p| read_record(p))
            .collect()
    }

    /// What: Write a record under its own language and slug.
    ///
    /// Inputs:
    /// - `manufacturer`: Manufacturer, or `None` for the legacy layout
    /// - `record`: Record to persist; `lang()` and `slug()` pick the path
    /// - `mode`: Overwrite policy
    ///
    /// Output:
    /// - `Written` or `Skipped`.
    ///
    /// # Errors
    /// - Returns `InvalidRecord` when the record fails validation; nothing is
    ///   written.
    /// - Returns `Err` when serialization or the write fails.
    pub fn write<R: Record>(
        &self,
        manufacturer: Option<&str>,
        record: &R,
        mode: WriteMode,
    ) -> Result<WriteOutcome> {
        record
            .validate()
            .map_err(|reason| PipelineError::InvalidRecord {
                path: self.layout.records_dir(R::KIND, manufacturer, record.lang()),
                reason,
            })?;
        let path = self
            .layout
            .record_path(R::KIND, manufacturer, record.lang(), record.slug());
        self.write_at(&path, record, mode)
    }

    /// What: Write a record to an explicit path.
    ///
    /// # Errors
    /// - Returns `Err` when serialization or the write fails.
    pub fn write_at<R: Record>(&self, path: &Path, record: &R, mode: WriteMode) -> Result<WriteOutcome> {
        let body = to_pretty_json(record, path)?;
        write_text(path, &body, mode)
    }
}
