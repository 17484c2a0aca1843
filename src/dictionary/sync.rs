//! Propagating dictionary completeness from one language to another.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{DictionaryKind, persist};
use crate::error::{PipelineError, Result};
use crate::presence::{Presence, insert_if_absent};

/// Result of merging a source dictionary into a target dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome<V> {
    /// Target dictionary with the missing keys filled in.
    pub updated: BTreeMap<String, V>,
    /// Number of keys copied from the source.
    pub added: usize,
}

/// What: Copy every source key the target lacks.
///
/// Inputs:
/// - `source`: Complete source-language dictionary
/// - `target`: Target-language dictionary (possibly empty)
///
/// Output:
/// - `SyncOutcome` with the merged target and the number of keys added.
///
/// Details:
/// - Target values that are present are kept as they are.
/// - Keys only in the target are untouched; nothing is deleted.
#[must_use]
pub fn synchronize<V: Presence + Clone>(
    source: &BTreeMap<String, V>,
    target: BTreeMap<String, V>,
) -> SyncOutcome<V> {
    let mut updated = target;
    let mut added = 0;
    for (key, value) in source {
        if insert_if_absent(&mut updated, key, value.clone()) {
            added += 1;
        }
    }
    SyncOutcome { updated, added }
}

/// What: Synchronize one dictionary file between two directories.
///
/// Inputs:
/// - `source_dir`: Source dictionary directory (file must exist)
/// - `target_dir`: Target dictionary directory (file may be absent)
///
/// Output:
/// - Number of keys added to the target file.
///
/// # Errors
/// - Returns `DictionaryMissing` when the source file is absent.
/// - Returns `Err` on unreadable, malformed, or unwritable files.
fn sync_file<V>(source_dir: &Path, target_dir: &Path, kind: DictionaryKind) -> Result<usize>
where
    V: Presence + Clone + Serialize + DeserializeOwned,
{
    let source: BTreeMap<String, V> = persist::load_required(source_dir, kind)?;
    let target: BTreeMap<String, V> = persist::load_or_default(target_dir, kind)?;
    let outcome = synchronize(&source, target);
    persist::save(target_dir, kind, &outcome.updated)?;
    Ok(outcome.added)
}

/// What: Synchronize one dictionary kind between two directories.
///
/// Inputs:
/// - `kind`: Dictionary kind
/// - `source_dir`: Source dictionary directory
/// - `target_dir`: Target dictionary directory
///
/// Output:
/// - Number of keys added.
///
/// # Errors
/// - Returns `Err` when the source file is missing or any file operation fails.
pub fn sync_kind(kind: DictionaryKind, source_dir: &Path, target_dir: &Path) -> Result<usize> {
    match kind {
        DictionaryKind::AttributeGroups
        | DictionaryKind::Attributes
        | DictionaryKind::Variants
        | DictionaryKind::Categories => sync_file::<String>(source_dir, target_dir, kind),
        DictionaryKind::Descriptions => sync_file::<Vec<String>>(source_dir, target_dir, kind),
        DictionaryKind::AttributeValues => {
            sync_file::<BTreeMap<String, String>>(source_dir, target_dir, kind)
        }
    }
}

/// What: Check that a source dictionary set is complete before syncing from it.
///
/// Inputs:
/// - `source_dir`: Source dictionary directory
///
/// # Errors
/// - Returns `DictionaryDirMissing` when the directory does not exist.
/// - Returns `DictionaryFilesMissing` listing every absent file.
pub fn ensure_complete_source(source_dir: &Path) -> Result<()> {
    if !source_dir.is_dir() {
        return Err(PipelineError::DictionaryDirMissing(source_dir.to_path_buf()));
    }
    let missing = super::missing_files(source_dir);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::DictionaryFilesMissing {
            dir: source_dir.to_path_buf(),
            files: missing.into_iter().map(str::to_string).collect(),
        })
    }
}
