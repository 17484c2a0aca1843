//! `dictionary build` and `dictionary sync`.

use crate::dictionary::build::build_all;
use crate::dictionary::sync::{ensure_complete_source, sync_kind};
use crate::dictionary::{DictionaryKind, DictionarySet};
use crate::error::{PipelineError, Result};
use crate::model::ProductRecord;
use crate::report::Reporter;
use crate::store::scraped::{discover_languages, discover_manufacturers, scraped_categories};
use crate::store::{Layout, RecordStore};

/// What: Build (grow) the dictionaries of one manufacturer and language.
///
/// Inputs:
/// - `layout`: Project layout
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
/// - `lang`: Language whose records are scanned
///
/// Output:
/// - The dictionary set as written to disk.
///
/// # Errors
/// - Returns `Err` when a record, scraped file, or dictionary cannot be read
///   or the dictionaries cannot be written.
///
/// Details:
/// - Record files are scanned in file-name order; existing dictionary values
///   always win over scanned ones.
pub fn generate(layout: &Layout, manufacturer: Option<&str>, lang: &str) -> Result<DictionarySet> {
    let store = RecordStore::new(layout.clone());
    let products: Vec<ProductRecord> = store.read_all(manufacturer, lang)?;
    let categories = scraped_categories(layout, manufacturer, lang)?;
    let dir = layout.dictionary_dir(manufacturer, lang);
    let existing = DictionarySet::load_existing(&dir)?;
    let dicts = build_all(&products, &categories, existing);
    dicts.save(&dir)?;
    tracing::info!(
        manufacturer = manufacturer.unwrap_or("-"),
        lang,
        products = products.len(),
        dir = %dir.display(),
        "dictionaries generated"
    );
    Ok(dicts)
}

/// What: Build dictionaries for every manufacturer and language found in the scraped input.
///
/// Inputs:
/// - `layout`: Project layout
/// - `reporter`: Progress sink
///
/// Output:
/// - Number of (manufacturer, language) pairs built.
///
/// # Errors
/// - Returns `NoManufacturers` when the scraped directory holds nothing.
/// - Returns the first I/O or decode error met.
pub fn build_all_dictionaries(layout: &Layout, reporter: &dyn Reporter) -> Result<usize> {
    let manufacturers = discover_manufacturers(&layout.scraped_dir)?;
    if manufacturers.is_empty() {
        return Err(PipelineError::NoManufacturers(layout.scraped_dir.clone()));
    }
    let mut built = 0;
    for manufacturer in &manufacturers {
        let m = manufacturer.as_deref();
        let label = m.unwrap_or(crate::sources::LEGACY_KEY);
        let languages = discover_languages(layout, m)?;
        if languages.is_empty() {
            reporter.warn(&format!("{label}: no languages found in scraped products, skipping"));
            continue;
        }
        for lang in &languages {
            let dicts = generate(layout, m, lang)?;
            reporter.success(&format!(
                "{label}/{lang}: {} attribute groups, {} attributes, {} variants, {} descriptions, {} categories, {} attribute values",
                dicts.attribute_groups.len(),
                dicts.attributes.len(),
                dicts.variants.len(),
                dicts.descriptions.len(),
                dicts.categories.len(),
                dicts.attribute_values.len()
            ));
            built += 1;
        }
    }
    reporter.summary(&format!("Dictionaries built for {built} manufacturer/language pair(s)"));
    Ok(built)
}

/// What: Copy every missing key from the source language's dictionaries into the target's.
///
/// Inputs:
/// - `layout`: Project layout
/// - `reporter`: Progress sink
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
/// - `source_lang`/`target_lang`: Language pair
///
/// Output:
/// - Total number of keys added across the six kinds.
///
/// # Errors
/// - Returns `DictionaryDirMissing`/`DictionaryFilesMissing` before any write
///   when the source set is absent or incomplete.
/// - Returns the first I/O or decode error; kinds already written stay written.
pub fn sync_dictionaries(
    layout: &Layout,
    reporter: &dyn Reporter,
    manufacturer: Option<&str>,
    source_lang: &str,
    target_lang: &str,
) -> Result<usize> {
    let source_dir = layout.dictionary_dir(manufacturer, source_lang);
    let target_dir = layout.dictionary_dir(manufacturer, target_lang);
    ensure_complete_source(&source_dir)?;
    reporter.info(&format!("Synchronizing dictionaries {source_lang} → {target_lang}"));

    let mut total = 0;
    for kind in DictionaryKind::ALL {
        let added = sync_kind(kind, &source_dir, &target_dir)?;
        if added == 0 {
            reporter.success(&format!("{}: up to date", kind.file_name()));
        } else {
            reporter.success(&format!("{}: added {added} new key(s)", kind.file_name()));
        }
        total += added;
    }
    reporter.summary(&format!("Synchronization complete: {total} key(s) added"));
    Ok(total)
}
