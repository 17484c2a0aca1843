//! Directory layout of the content tree.
//!
//! ```text
//! {content}/{products|categories}/{manufacturer}/{lang}/{slug}.json
//! {content}/dictionaries/{manufacturer}/{lang}/{kind}.json
//! {scraped}/{manufacturer}/{products|categories}.jsonl
//! {progress}/{type}-{manufacturer}-{source}-{target}.json
//! ```
//!
//! A `None` manufacturer selects the legacy single-tenant layout, where the
//! manufacturer segment is left out.

use std::path::{Path, PathBuf};

use crate::model::EntityKind;

/// Resolved root directories for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Root of the record store and dictionaries.
    pub content_dir: PathBuf,
    /// Root of the scraped JSONL input.
    pub scraped_dir: PathBuf,
    /// Directory holding automatic-translation progress ledgers.
    pub progress_dir: PathBuf,
}

/// What: Join an optional manufacturer segment and a language onto `base`.
///
/// Inputs:
/// - `base`: Directory to extend
/// - `manufacturer`: Manufacturer segment, or `None` for the legacy layout
/// - `lang`: Language segment
///
/// Output:
/// - `base/{manufacturer}/{lang}` or `base/{lang}`.
fn scoped(base: &Path, manufacturer: Option<&str>, lang: &str) -> PathBuf {
    let mut p = base.to_path_buf();
    if let Some(m) = manufacturer {
        p.push(m);
    }
    p.push(lang);
    p
}

impl Layout {
    /// What: Build a layout rooted at `root` with the default directory names.
    ///
    /// Inputs:
    /// - `root`: Project root
    ///
    /// Output:
    /// - Layout using `content/`, `scraped/`, and `.translations-progress/`.
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            content_dir: root.join("content"),
            scraped_dir: root.join("scraped"),
            progress_dir: root.join(".translations-progress"),
        }
    }

    /// Directory holding one language's records of `kind`.
    #[must_use]
    pub fn records_dir(&self, kind: EntityKind, manufacturer: Option<&str>, lang: &str) -> PathBuf {
        scoped(&self.content_dir.join(kind.dir_name()), manufacturer, lang)
    }

    /// Path of one record file.
    #[must_use]
    pub fn record_path(
        &self,
        kind: EntityKind,
        manufacturer: Option<&str>,
        lang: &str,
        slug: &str,
    ) -> PathBuf {
        self.records_dir(kind, manufacturer, lang)
            .join(format!("{slug}.json"))
    }

    /// Directory of the six dictionary files for one language.
    #[must_use]
    pub fn dictionary_dir(&self, manufacturer: Option<&str>, lang: &str) -> PathBuf {
        scoped(&self.content_dir.join("dictionaries"), manufacturer, lang)
    }

    /// Scraped JSONL input for `kind`.
    #[must_use]
    pub fn scraped_file(&self, kind: EntityKind, manufacturer: Option<&str>) -> PathBuf {
        let mut p = self.scraped_dir.clone();
        if let Some(m) = manufacturer {
            p.push(m);
        }
        p.push(format!("{}.jsonl", kind.dir_name()));
        p
    }
}
