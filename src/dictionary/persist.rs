use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::DictionaryKind;
use crate::error::{PipelineError, Result};
use crate::store::{WriteMode, write_text};

/// What: Render a dictionary the way it is stored on disk.
///
/// Inputs:
/// - `value`: Dictionary (or any serializable value)
///
/// Output:
/// - JSON with 4-space indentation and a trailing newline.
///
/// # Errors
/// - Returns `Err` when serialization fails.
///
/// Details:
/// - Key order comes from the `BTreeMap`s, so output is sorted at every depth
///   and byte-identical for equal dictionaries.
pub fn to_sorted_json<T: Serialize>(value: &T) -> std::result::Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut s = String::from_utf8_lossy(&buf).into_owned();
    s.push('\n');
    Ok(s)
}

/// What: Load one dictionary file if it exists.
///
/// Inputs:
/// - `dir`: Dictionary directory
/// - `kind`: Which dictionary
///
/// Output:
/// - `Ok(None)` when the file is absent.
///
/// # Errors
/// - Returns `Err` when the file exists but is unreadable or malformed.
pub fn load<V: DeserializeOwned>(dir: &Path, kind: DictionaryKind) -> Result<Option<BTreeMap<String, V>>> {
    let path = dir.join(kind.file_name());
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
    let map = serde_json::from_str(&body).map_err(|e| PipelineError::json(&path, e))?;
    Ok(Some(map))
}

/// What: Load one dictionary file, or an empty map when it is absent.
///
/// # Errors
/// - Returns `Err` when the file exists but is unreadable or malformed.
pub fn load_or_default<V: DeserializeOwned>(
    dir: &Path,
    kind: DictionaryKind,
) -> Result<BTreeMap<String, V>> {
    Ok(load(dir, kind)?.unwrap_or_default())
}

/// What: Load one dictionary file that must exist.
///
/// # Errors
/// - Returns `DictionaryMissing` when the file is absent.
/// - Returns `Err` when the file is unreadable or malformed.
pub fn load_required<V: DeserializeOwned>(
    dir: &Path,
    kind: DictionaryKind,
) -> Result<BTreeMap<String, V>> {
    load(dir, kind)?.ok_or_else(|| PipelineError::DictionaryMissing(dir.join(kind.file_name())))
}

/// What: Persist one dictionary, creating the directory when needed.
///
/// Inputs:
/// - `dir`: Dictionary directory
/// - `kind`: Which dictionary
/// - `map`: Content to write
///
/// # Errors
/// - Returns `Err` when serialization or the write fails.
pub fn save<V: Serialize>(dir: &Path, kind: DictionaryKind, map: &BTreeMap<String, V>) -> Result<()> {
    let path = dir.join(kind.file_name());
    let body = to_sorted_json(map).map_err(|e| PipelineError::json(&path, e))?;
    write_text(&path, &body, WriteMode::Overwrite)?;
    tracing::debug!(
        path = %path.display(),
        entries = map.len(),
        "saved dictionary"
    );
    Ok(())
}
