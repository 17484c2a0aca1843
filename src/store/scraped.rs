//! Discovery over the scraped input tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::jsonl::read_jsonl;
use super::layout::Layout;
use crate::error::{PipelineError, Result};
use crate::model::{EntityKind, path_safe, text};

/// Minimal view of a scraped category line used for the categories dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ScrapedCategory {
    /// Category id.
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    /// Localized name.
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    /// Language of the line, when the scraper recorded it.
    #[serde(default, deserialize_with = "text")]
    pub lang: String,
}

/// Only the language of a scraped product line.
#[derive(Deserialize)]
struct LangLine {
    /// Language code.
    #[serde(default, deserialize_with = "text")]
    lang: String,
}

/// What: List manufacturers present in the scraped directory.
///
/// Inputs:
/// - `scraped_dir`: Root of the scraped input
///
/// Output:
/// - `vec![None]` for the legacy layout (JSONL files directly in the root),
///   otherwise every subdirectory name sorted, or an empty list when the
///   directory does not exist.
///
/// # Errors
/// - Returns `Err` when the directory exists but cannot be listed.
pub fn discover_manufacturers(scraped_dir: &Path) -> Result<Vec<Option<String>>> {
    if !scraped_dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(scraped_dir).map_err(|e| PipelineError::io(scraped_dir, e))?;
    let mut dirs = Vec::new();
    let mut has_legacy_files = false;
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::io(scraped_dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                dirs.push(name.to_string());
            }
        } else if path.extension().is_some_and(|ext| ext == "jsonl") {
            has_legacy_files = true;
        }
    }
    if has_legacy_files {
        return Ok(vec![None]);
    }
    dirs.sort();
    Ok(dirs.into_iter().map(Some).collect())
}

/// What: Collect the distinct languages of a manufacturer's scraped products.
///
/// Inputs:
/// - `layout`: Project layout
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
///
/// Output:
/// - Sorted set of non-empty `lang` values that are plain file names; empty
///   when the file is missing.
///
/// # Errors
/// - Returns `Err` when the products file exists but cannot be read.
pub fn discover_languages(layout: &Layout, manufacturer: Option<&str>) -> Result<BTreeSet<String>> {
    let path = layout.scraped_file(EntityKind::Product, manufacturer);
    let Some(batch) = read_jsonl::<LangLine, _>(&path, |p| path_safe(&[("lang", &p.lang)]))? else {
        return Ok(BTreeSet::new());
    };
    Ok(batch
        .entries
        .into_iter()
        .map(|p| p.lang)
        .filter(|l| !l.is_empty())
        .collect())
}

/// What: Read scraped categories usable for the `lang` categories dictionary.
///
/// Inputs:
/// - `layout`: Project layout
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
/// - `lang`: Dictionary language
///
/// Output:
/// - Lines whose `lang` equals `lang` or is absent, in file order.
///
/// # Errors
/// - Returns `Err` when the categories file exists but cannot be read.
pub fn scraped_categories(
    layout: &Layout,
    manufacturer: Option<&str>,
    lang: &str,
) -> Result<Vec<ScrapedCategory>> {
    let path = layout.scraped_file(EntityKind::Category, manufacturer);
    let Some(batch) = read_jsonl::<ScrapedCategory, _>(&path, |_| Ok(()))? else {
        return Ok(Vec::new());
    };
    Ok(batch
        .entries
        .into_iter()
        .filter(|c| c.lang.is_empty() || c.lang == lang)
        .collect())
}
