//! Resolved runtime settings.
//!
//! Layering, lowest to highest: built-in defaults, `{root}/pipeline.conf`,
//! the `GONDOR_ENDPOINT` environment variable, command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PipelineError, Result};
use crate::pipeline::translations::DEFAULT_CATEGORY_BATCH_SIZE;
use crate::store::Layout;
use crate::util::config::parse_entries;

/// Name of the optional configuration file under the project root.
pub const CONFIG_FILE: &str = "pipeline.conf";
/// Environment variable overriding the translation endpoint.
pub const ENDPOINT_ENV: &str = "GONDOR_ENDPOINT";
/// Translation endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://gondor:8080/translate";
/// Per-call translation timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Values taken from the command line; `None` leaves lower layers in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Translation endpoint.
    pub endpoint: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Everything a command needs to locate files and reach the translator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Project root.
    pub root: PathBuf,
    /// Record store and dictionaries.
    pub content_dir: PathBuf,
    /// Scraped JSONL input.
    pub scraped_dir: PathBuf,
    /// Automatic translation ledgers.
    pub progress_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
    /// Translation endpoint URL.
    pub endpoint: String,
    /// Per-call translation timeout.
    pub request_timeout: Duration,
    /// Categories per automatic translation batch.
    pub category_batch_size: usize,
}

impl Settings {
    /// What: Defaults rooted at `root`.
    ///
    /// Inputs:
    /// - `root`: Project root
    ///
    /// Output:
    /// - `content/`, `scraped/`, `.translations-progress/`, `logs/`, the
    ///   default endpoint, a 60 s timeout and batches of 100.
    #[must_use]
    pub fn defaults(root: &Path) -> Self {
        let layout = Layout::under(root);
        Self {
            root: root.to_path_buf(),
            content_dir: layout.content_dir,
            scraped_dir: layout.scraped_dir,
            progress_dir: layout.progress_dir,
            log_dir: root.join("logs"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            category_batch_size: DEFAULT_CATEGORY_BATCH_SIZE,
        }
    }

    /// What: Resolve settings from every layer.
    ///
    /// Inputs:
    /// - `root`: Project root
    /// - `env_endpoint`: Value of `GONDOR_ENDPOINT`, if set
    /// - `overrides`: Command-line values
    ///
    /// Output:
    /// - Resolved settings.
    ///
    /// # Errors
    /// - Returns `Err` when `pipeline.conf` exists but cannot be read.
    pub fn load(root: &Path, env_endpoint: Option<String>, overrides: &Overrides) -> Result<Self> {
        let mut settings = Self::defaults(root);
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            let text = fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
            settings.apply_file(&text);
            tracing::debug!(path = %path.display(), "configuration file applied");
        }
        if let Some(endpoint) = env_endpoint.filter(|e| !e.trim().is_empty()) {
            settings.endpoint = endpoint;
        }
        if let Some(endpoint) = &overrides.endpoint {
            settings.endpoint.clone_from(endpoint);
        }
        if let Some(secs) = overrides.timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }

    /// What: Apply the entries of a `pipeline.conf` body.
    ///
    /// Details:
    /// - Relative directories resolve against `root`.
    /// - Unknown keys, malformed lines and bad numbers are logged and ignored.
    pub fn apply_file(&mut self, text: &str) {
        let (entries, malformed) = parse_entries(text);
        for line in malformed {
            tracing::warn!(line, "ignoring malformed configuration line");
        }
        for entry in entries {
            match entry.key.as_str() {
                "content_dir" => self.content_dir = self.root.join(&entry.value),
                "scraped_dir" => self.scraped_dir = self.root.join(&entry.value),
                "progress_dir" => self.progress_dir = self.root.join(&entry.value),
                "endpoint" => self.endpoint = entry.value,
                "timeout_secs" => match entry.value.parse::<u64>() {
                    Ok(secs) => self.request_timeout = Duration::from_secs(secs),
                    Err(e) => tracing::warn!(
                        line = entry.line,
                        value = %entry.value,
                        error = %e,
                        "invalid timeout_secs"
                    ),
                },
                "category_batch_size" => match entry.value.parse::<usize>() {
                    Ok(n) if n > 0 => self.category_batch_size = n,
                    _ => tracing::warn!(line = entry.line, value = %entry.value, "invalid category_batch_size"),
                },
                other => tracing::warn!(line = entry.line, key = other, "unknown configuration key"),
            }
        }
    }

    /// Directory layout for the store, dictionaries and ledgers.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout {
            content_dir: self.content_dir.clone(),
            scraped_dir: self.scraped_dir.clone(),
            progress_dir: self.progress_dir.clone(),
        }
    }
}
