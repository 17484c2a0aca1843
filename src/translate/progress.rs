//! Durable progress ledger for automatic translation sessions.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::model::EntityKind;
use crate::store::{WriteMode, to_pretty_json, write_text};

/// An item whose translation failed, with the error text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    /// Record id.
    pub id: String,
    /// Error message from the failed attempt.
    pub error: String,
}

/// Completed and failed ids of one session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationProgress {
    /// Ids translated and saved, in completion order.
    #[serde(default)]
    pub completed: Vec<String>,
    /// Ids whose last attempt failed.
    #[serde(default)]
    pub failed: Vec<FailedItem>,
}

impl TranslationProgress {
    /// Whether `id` was already translated.
    #[must_use]
    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|c| c == id)
    }

    /// Whether the last attempt at `id` failed.
    #[must_use]
    pub fn is_failed(&self, id: &str) -> bool {
        self.failed.iter().any(|f| f.id == id)
    }

    /// What: Record a successful translation.
    ///
    /// Details:
    /// - A retried item leaves `failed`; an id is never listed twice.
    pub fn mark_completed(&mut self, id: &str) {
        self.failed.retain(|f| f.id != id);
        if !self.is_completed(id) {
            self.completed.push(id.to_string());
        }
    }

    /// What: Record a failed translation.
    ///
    /// Details:
    /// - A repeated failure replaces the stored message.
    pub fn mark_failed(&mut self, id: &str, error: &str) {
        if let Some(existing) = self.failed.iter_mut().find(|f| f.id == id) {
            existing.error = error.to_string();
        } else {
            self.failed.push(FailedItem {
                id: id.to_string(),
                error: error.to_string(),
            });
        }
    }

    /// What: Decide whether an item belongs to this run's work list.
    ///
    /// Inputs:
    /// - `id`: Record id
    /// - `skip_failed`: Exclude previously failed items too
    ///
    /// Output:
    /// - `true` when the item must be translated in this run.
    #[must_use]
    pub fn is_pending(&self, id: &str, skip_failed: bool) -> bool {
        !self.is_completed(id) && !(skip_failed && self.is_failed(id))
    }
}

/// Identifies one automatic translation session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKey {
    /// Entity kind being translated.
    pub kind: EntityKind,
    /// Manufacturer, or `None` for the legacy layout.
    pub manufacturer: Option<String>,
    /// Source language.
    pub source: String,
    /// Target language.
    pub target: String,
}

impl SessionKey {
    /// What: Build a key.
    ///
    /// Inputs:
    /// - `kind`: Entity kind
    /// - `manufacturer`: Manufacturer, or `None` for the legacy layout
    /// - `source`/`target`: Language pair
    #[must_use]
    pub fn new(kind: EntityKind, manufacturer: Option<&str>, source: &str, target: &str) -> Self {
        Self {
            kind,
            manufacturer: manufacturer.map(str::to_string),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Ledger file name: `{type}-{manufacturer|default}-{source}-{target}.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}-{}.json",
            self.kind.session_name(),
            self.manufacturer.as_deref().unwrap_or("default"),
            self.source,
            self.target
        )
    }
}

/// Persistence of progress ledgers keyed by session.
pub trait ProgressStore: Send + Sync {
    /// What: Load the ledger for `key`, or an empty one.
    ///
    /// # Errors
    /// - Returns `Err` when a stored ledger cannot be read or decoded.
    fn load(&self, key: &SessionKey) -> Result<TranslationProgress>;

    /// What: Persist the ledger for `key`.
    ///
    /// # Errors
    /// - Returns `Err` when the ledger cannot be written.
    fn save(&self, key: &SessionKey, progress: &TranslationProgress) -> Result<()>;

    /// What: Remove the ledger for `key` if it exists.
    ///
    /// # Errors
    /// - Returns `Err` when an existing ledger cannot be removed.
    fn clear(&self, key: &SessionKey) -> Result<()>;
}

/// One JSON file per session inside a directory.
#[derive(Clone, Debug)]
pub struct FileProgressStore {
    /// Directory holding the ledgers.
    dir: PathBuf,
}

impl FileProgressStore {
    /// Store ledgers under `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ledger path for `key`.
    #[must_use]
    pub fn path(&self, key: &SessionKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self, key: &SessionKey) -> Result<TranslationProgress> {
        let path = self.path(key);
        if !path.is_file() {
            return Ok(TranslationProgress::default());
        }
        let body = fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
        let progress: TranslationProgress =
            serde_json::from_str(&body).map_err(|e| PipelineError::json(&path, e))?;
        tracing::debug!(
            path = %path.display(),
            completed = progress.completed.len(),
            failed = progress.failed.len(),
            "loaded translation progress"
        );
        Ok(progress)
    }

    fn save(&self, key: &SessionKey, progress: &TranslationProgress) -> Result<()> {
        let path = self.path(key);
        let body = to_pretty_json(progress, &path)?;
        write_text(&path, &body, WriteMode::Overwrite)?;
        Ok(())
    }

    fn clear(&self, key: &SessionKey) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "cleared translation progress");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PipelineError::io(&path, e)),
        }
    }
}
