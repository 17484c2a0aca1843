//! Error taxonomy for the content pipeline.
//!
//! Precondition failures (missing directories, incomplete dictionary sets) and
//! strict translation gaps are fatal for a command. Lenient gaps and per-item
//! automatic translation failures are recorded by the orchestration layer and
//! never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline command.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading or writing a file failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A JSON document could not be parsed or serialized.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A record parsed but failed validation at the store boundary.
    #[error("invalid record in {}: {reason}", .path.display())]
    InvalidRecord {
        /// File involved.
        path: PathBuf,
        /// Which required field was missing or malformed.
        reason: String,
    },
    /// A source content directory does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),
    /// A target content directory required by `update` does not exist.
    #[error("target directory not found: {}", .0.display())]
    TargetDirMissing(PathBuf),
    /// The source dictionary directory for a sync does not exist.
    #[error("source dictionary directory not found: {}", .0.display())]
    DictionaryDirMissing(PathBuf),
    /// The source dictionary set for a sync is incomplete.
    #[error("missing source dictionary files in {}: {}", .dir.display(), .files.join(", "))]
    DictionaryFilesMissing {
        /// Dictionary directory that was checked.
        dir: PathBuf,
        /// File names that were absent.
        files: Vec<String>,
    },
    /// A dictionary file required for translation does not exist.
    #[error("dictionary file not found: {}", .0.display())]
    DictionaryMissing(PathBuf),
    /// Strict translation hit a missing dictionary entry.
    #[error(transparent)]
    MissingTranslation(#[from] MissingTranslation),
    /// No manufacturer could be discovered in the scraped input directory.
    #[error("no manufacturer directories found in {}", .0.display())]
    NoManufacturers(PathBuf),
    /// The external translation seam reported an error.
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// A category batch failed; every id in it was recorded as failed.
    #[error("category batch of {count} item(s) failed: {source}")]
    BatchFailed {
        /// Number of categories in the failed batch.
        count: usize,
        /// Error that failed the batch.
        #[source]
        source: TranslateError,
    },
    /// No product source is registered for the manufacturer.
    #[error("unknown manufacturer: {0}")]
    UnknownManufacturer(String),
    /// Positional arguments did not match any accepted form.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl PipelineError {
    /// What: Build an `Io` error bound to a path.
    ///
    /// Inputs:
    /// - `path`: File or directory involved
    /// - `source`: Underlying I/O error
    ///
    /// Output:
    /// - `PipelineError::Io`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// What: Build a `Json` error bound to a path.
    ///
    /// Inputs:
    /// - `path`: File involved
    /// - `source`: Underlying serde error
    ///
    /// Output:
    /// - `PipelineError::Json`
    #[must_use]
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// A dictionary lookup that failed during translation.
///
/// Strict translation returns the first one found; lenient translation
/// collects every one of them as warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingTranslation {
    /// `categories[category_slug]` is missing for a product.
    #[error("missing translation for category slug: {0}")]
    CategorySlug(String),
    /// `descriptions[product_id]` is missing.
    #[error("missing translation for description of product: {0}")]
    Description(String),
    /// `attribute-groups[group_id]` is missing.
    #[error("missing translation for attribute group: {0}")]
    AttributeGroup(String),
    /// `attributes[attribute_id]` is missing.
    #[error("missing translation for attribute: {0}")]
    Attribute(String),
    /// `attribute-values[product_id]` is missing altogether.
    #[error("missing attribute values for product: {0}")]
    AttributeValues(String),
    /// `attribute-values[product_id][attribute_id]` is missing.
    #[error("missing translated value for attribute: {attribute} in product: {product}")]
    AttributeValue {
        /// Attribute (property) id.
        attribute: String,
        /// Product id.
        product: String,
    },
    /// `variants[variant_id]` is missing.
    #[error("missing translation for variant: {0}")]
    Variant(String),
    /// `categories[category_id]` is missing for a category record.
    #[error("missing translation for category: {0}")]
    Category(String),
}

/// Errors raised by a text translator implementation.
///
/// The HTTP client never returns these (it falls back to the original text);
/// they exist for translators that must report failure, and they drive the
/// failed-item bookkeeping of automatic translation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Transport-level failure.
    #[error("translation request failed: {0}")]
    Http(String),
    /// Endpoint answered with a non-success status.
    #[error("translation API returned {0}")]
    Status(u16),
    /// Call exceeded its deadline.
    #[error("translation request timed out")]
    Timeout,
    /// Translator refused the text.
    #[error("translation rejected: {0}")]
    Rejected(String),
}
