//! `translation init`, `translation update` and `translation auto`.

use std::path::{Path, PathBuf};

use crate::dictionary::{DictionaryKind, DictionarySet, TermDictionary, persist};
use crate::error::{PipelineError, Result};
use crate::model::{CategoryRecord, EntityKind, ProductRecord};
use crate::report::Reporter;
use crate::store::{Layout, RecordStore, WriteMode, WriteOutcome, list_json_files, read_record};
use crate::translate::auto::{translate_categories_auto, translate_product_auto};
use crate::translate::lenient::apply_translations_to_product;
use crate::translate::progress::{ProgressStore, SessionKey, TranslationProgress};
use crate::translate::strict::{translate_category, translate_product};
use crate::translate::TextTranslator;

use super::{RunSummary, file_label};

/// Default number of categories per automatic translation batch.
pub const DEFAULT_CATEGORY_BATCH_SIZE: usize = 100;

/// What: Strictly translate products and categories that have no target file yet.
///
/// Inputs:
/// - `layout`: Project layout
/// - `reporter`: Progress sink
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
/// - `source_lang`/`target_lang`: Language pair
///
/// Output:
/// - Totals over products and categories.
///
/// # Errors
/// - Returns `DictionaryMissing` or `SourceDirMissing` before any write.
/// - Returns the first `MissingTranslation`; files written before it stay.
///
/// Details:
/// - Existing target files are never touched, so reruns resume where the
///   previous run stopped.
pub fn init_translations(
    layout: &Layout,
    reporter: &dyn Reporter,
    manufacturer: Option<&str>,
    source_lang: &str,
    target_lang: &str,
) -> Result<RunSummary> {
    let products = init_products(layout, reporter, manufacturer, source_lang, target_lang)?;
    let categories = init_categories(layout, reporter, manufacturer, source_lang, target_lang)?;
    Ok(RunSummary {
        written: products.written + categories.written,
        skipped: products.skipped + categories.skipped,
        ..RunSummary::default()
    })
}

/// Strict product pass of `init_translations`.
fn init_products(
    layout: &Layout,
    reporter: &dyn Reporter,
    manufacturer: Option<&str>,
    source_lang: &str,
    target_lang: &str,
) -> Result<RunSummary> {
    let dicts = DictionarySet::load(&layout.dictionary_dir(manufacturer, target_lang))?;
    reporter.success("Dictionaries loaded");

    let source_dir = layout.records_dir(EntityKind::Product, manufacturer, source_lang);
    if !source_dir.is_dir() {
        return Err(PipelineError::SourceDirMissing(source_dir));
    }
    let target_dir = layout.records_dir(EntityKind::Product, manufacturer, target_lang);
    let files = list_json_files(&source_dir)?;
    reporter.info(&format!("Found {} products to translate", files.len()));

    let store = RecordStore::new(layout.clone());
    let mut summary = RunSummary::default();
    for file in &files {
        let label = file_label(file);
        let target = target_dir.join(&label);
        if target.exists() {
            reporter.skipped(&format!("{label} - already exists, skipping"));
            summary.skipped += 1;
            continue;
        }
        let product: ProductRecord = read_record(file)?;
        let translated = translate_product(&product, target_lang, &dicts).map_err(|e| {
            reporter.error(&format!("{label}: {e}"));
            PipelineError::from(e)
        })?;
        match store.write_at(&target, &translated, WriteMode::CreateIfAbsent)? {
            WriteOutcome::Written => {
                reporter.success(&label);
                summary.written += 1;
            }
            WriteOutcome::Skipped => summary.skipped += 1,
        }
    }
    reporter.summary(&format!(
        "Translation complete: {} products translated, {} skipped",
        summary.written, summary.skipped
    ));
    Ok(summary)
}

/// Strict category pass of `init_translations`.
fn init_categories(
    layout: &Layout,
    reporter: &dyn Reporter,
    manufacturer: Option<&str>,
    source_lang: &str,
    target_lang: &str,
) -> Result<RunSummary> {
    let categories: TermDictionary = persist::load_required(
        &layout.dictionary_dir(manufacturer, target_lang),
        DictionaryKind::Categories,
    )?;
    let source_dir = layout.records_dir(EntityKind::Category, manufacturer, source_lang);
    if !source_dir.is_dir() {
        reporter.info(&format!(
            "Source categories directory not found: {}, skipping categories",
            source_dir.display()
        ));
        return Ok(RunSummary::default());
    }
    let target_dir = layout.records_dir(EntityKind::Category, manufacturer, target_lang);
    let store = RecordStore::new(layout.clone());
    let mut summary = RunSummary::default();
    for file in list_json_files(&source_dir)? {
        let label = file_label(&file);
        let target = target_dir.join(&label);
        if target.exists() {
            reporter.skipped(&format!("{label} - already exists, skipping"));
            summary.skipped += 1;
            continue;
        }
        let category: CategoryRecord = read_record(&file)?;
        let translated = translate_category(&category, target_lang, &categories).map_err(|e| {
            reporter.error(&format!("{label}: {e}"));
            PipelineError::from(e)
        })?;
        match store.write_at(&target, &translated, WriteMode::CreateIfAbsent)? {
            WriteOutcome::Written => {
                reporter.success(&label);
                summary.written += 1;
            }
            WriteOutcome::Skipped => summary.skipped += 1,
        }
    }
    reporter.summary(&format!(
        "Categories translation complete: {} categories translated, {} skipped",
        summary.written, summary.skipped
    ));
    Ok(summary)
}

/// What: Re-apply the current dictionaries to existing target products.
///
/// Inputs:
/// - `layout`: Project layout
/// - `reporter`: Progress sink
/// - `manufacturer`: Manufacturer, or `None` for the legacy layout
/// - `target_lang`: Language of the records to update
///
/// Output:
/// - `written` updated files, `problems` files that failed, `warnings`
///   missing lookups whose old values were kept.
///
/// # Errors
/// - Returns `DictionaryMissing` or `TargetDirMissing` before any write.
///
/// Details:
/// - Per-file failures are reported and counted; the run continues.
/// - `lead` and `description` are left as they are.
pub fn update_translations(
    layout: &Layout,
    reporter: &dyn Reporter,
    manufacturer: Option<&str>,
    target_lang: &str,
) -> Result<RunSummary> {
    let dicts = DictionarySet::load(&layout.dictionary_dir(manufacturer, target_lang))?;
    reporter.success("Dictionaries loaded");

    let target_dir = layout.records_dir(EntityKind::Product, manufacturer, target_lang);
    if !target_dir.is_dir() {
        return Err(PipelineError::TargetDirMissing(target_dir));
    }
    let files = list_json_files(&target_dir)?;
    reporter.info(&format!("Found {} products to update", files.len()));

    let store = RecordStore::new(layout.clone());
    let mut summary = RunSummary::default();
    for file in &files {
        let label = file_label(file);
        let result = read_record::<ProductRecord>(file).and_then(|product| {
            let outcome = apply_translations_to_product(&product, &dicts);
            for missing in &outcome.missing {
                reporter.warn(&format!("{label}: {missing}"));
            }
            store.write_at(file, &outcome.product, WriteMode::Overwrite)?;
            Ok(outcome.missing.len())
        });
        match result {
            Ok(warnings) => {
                reporter.success(&format!("{label} updated"));
                summary.written += 1;
                summary.warnings += warnings;
            }
            Err(e) => {
                reporter.error(&format!("{label}: {e}"));
                summary.problems += 1;
            }
        }
    }
    reporter.summary(&format!(
        "Update complete: {} products updated, {} missing translation(s) kept",
        summary.written, summary.warnings
    ));
    if summary.problems > 0 {
        reporter.warn(&format!("{} product(s) had errors", summary.problems));
    }
    Ok(summary)
}

/// Knobs of an automatic translation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoOptions {
    /// Leave items that failed in an earlier run out of the work list.
    pub skip_failed: bool,
    /// Categories per translation batch.
    pub category_batch_size: usize,
}

impl Default for AutoOptions {
    fn default() -> Self {
        Self {
            skip_failed: false,
            category_batch_size: DEFAULT_CATEGORY_BATCH_SIZE,
        }
    }
}

/// Resumable machine translation of one manufacturer's records.
pub struct AutoTranslation<'a, T> {
    /// Project layout.
    layout: &'a Layout,
    /// Progress sink.
    reporter: &'a dyn Reporter,
    /// Ledger persistence.
    progress: &'a dyn ProgressStore,
    /// Text-translation primitive.
    translator: &'a T,
    /// Run options.
    options: AutoOptions,
}

/// A source record file waiting for translation.
struct WorkItem<R> {
    /// Source file; its name is reused for the target file.
    file: PathBuf,
    /// Decoded source record.
    record: R,
}

impl<'a, T: TextTranslator> AutoTranslation<'a, T> {
    /// What: Bind the collaborators of an automatic translation run.
    ///
    /// Inputs:
    /// - `layout`: Project layout
    /// - `reporter`: Progress sink
    /// - `progress`: Ledger persistence
    /// - `translator`: Text-translation primitive
    /// - `options`: Retry policy and batch size
    #[must_use]
    pub fn new(
        layout: &'a Layout,
        reporter: &'a dyn Reporter,
        progress: &'a dyn ProgressStore,
        translator: &'a T,
        options: AutoOptions,
    ) -> Self {
        Self {
            layout,
            reporter,
            progress,
            translator,
            options,
        }
    }

    /// What: Translate products, then categories.
    ///
    /// # Errors
    /// - Returns `Err` on precondition failures, I/O failures, or a failed
    ///   category batch. Failed products are recorded, not returned.
    pub async fn run(
        &self,
        manufacturer: Option<&str>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<RunSummary> {
        let products = self.products(manufacturer, source_lang, target_lang).await?;
        let categories = self.categories(manufacturer, source_lang, target_lang).await?;
        Ok(RunSummary {
            written: products.written + categories.written,
            skipped: products.skipped + categories.skipped,
            problems: products.problems + categories.problems,
            warnings: 0,
        })
    }

    /// What: Translate every pending product, one at a time.
    ///
    /// Output:
    /// - `written` products translated in this run, `skipped` excluded by the
    ///   ledger, `problems` failures outstanding in the ledger.
    ///
    /// # Errors
    /// - Returns `SourceDirMissing` when the source directory does not exist.
    /// - Returns `Err` when a record or the ledger cannot be read or written.
    ///
    /// Details:
    /// - The ledger is saved after every product. A translation error only
    ///   marks that product failed and the loop moves on.
    /// - The ledger file is removed once nothing is left failed.
    pub async fn products(
        &self,
        manufacturer: Option<&str>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<RunSummary> {
        self.reporter.info(&format!(
            "Auto-translating {} products from {source_lang} to {target_lang}",
            manufacturer.unwrap_or(crate::sources::LEGACY_KEY)
        ));
        let key = SessionKey::new(EntityKind::Product, manufacturer, source_lang, target_lang);
        let mut progress = self.load_progress(&key)?;

        let source_dir = self.layout.records_dir(EntityKind::Product, manufacturer, source_lang);
        if !source_dir.is_dir() {
            return Err(PipelineError::SourceDirMissing(source_dir));
        }
        let target_dir = self.layout.records_dir(EntityKind::Product, manufacturer, target_lang);
        let (work, total) = self.work_list::<ProductRecord>(&source_dir, &progress, |p| &p.id)?;
        self.reporter.info(&format!(
            "Found {total} products, {} need translation",
            work.len()
        ));

        let store = RecordStore::new(self.layout.clone());
        let mut written = 0;
        for (idx, item) in work.iter().enumerate() {
            let product = &item.record;
            self.reporter.info(&format!(
                "Translating product {}/{}: {}",
                idx + 1,
                work.len(),
                product.label()
            ));
            match translate_product_auto(self.translator, product, source_lang, target_lang).await {
                Ok(translated) => {
                    store.write_at(
                        &target_dir.join(file_label(&item.file)),
                        &translated,
                        WriteMode::Overwrite,
                    )?;
                    progress.mark_completed(&product.id);
                    self.progress.save(&key, &progress)?;
                    written += 1;
                    self.reporter.success(&format!("Completed ({}/{})", idx + 1, work.len()));
                }
                Err(e) => {
                    tracing::warn!(id = %product.id, error = %e, "product translation failed");
                    progress.mark_failed(&product.id, &e.to_string());
                    self.progress.save(&key, &progress)?;
                    self.reporter.error(&format!("Error translating {}: {e}", product.id));
                }
            }
        }

        self.reporter.summary(&format!(
            "Auto-translation complete: {written} products translated, {} total",
            progress.completed.len()
        ));
        self.finish(&key, &progress, "product(s)")?;
        Ok(RunSummary {
            written,
            skipped: total - work.len(),
            problems: progress.failed.len(),
            warnings: 0,
        })
    }

    /// What: Translate every pending category in batches.
    ///
    /// Output:
    /// - Same counters as [`Self::products`]; an empty summary when the
    ///   source category directory does not exist.
    ///
    /// # Errors
    /// - Returns `BatchFailed` after recording every category of the failed
    ///   batch in the ledger; later batches are not attempted.
    /// - Returns `Err` when a record or the ledger cannot be read or written.
    pub async fn categories(
        &self,
        manufacturer: Option<&str>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<RunSummary> {
        let source_dir = self.layout.records_dir(EntityKind::Category, manufacturer, source_lang);
        if !source_dir.is_dir() {
            self.reporter.info(&format!(
                "Source categories directory not found: {}, skipping categories",
                source_dir.display()
            ));
            return Ok(RunSummary::default());
        }
        let key = SessionKey::new(EntityKind::Category, manufacturer, source_lang, target_lang);
        let mut progress = self.load_progress(&key)?;
        let target_dir = self.layout.records_dir(EntityKind::Category, manufacturer, target_lang);
        let (work, total) = self.work_list::<CategoryRecord>(&source_dir, &progress, |c| &c.id)?;
        self.reporter.info(&format!(
            "Found {total} categories, {} need translation",
            work.len()
        ));

        let store = RecordStore::new(self.layout.clone());
        let batch_size = self.options.category_batch_size.max(1);
        let mut written = 0;
        for (batch_no, batch) in work.chunks(batch_size).enumerate() {
            self.reporter.info(&format!(
                "Processing batch {} ({} categories)",
                batch_no + 1,
                batch.len()
            ));
            let records: Vec<CategoryRecord> = batch.iter().map(|w| w.record.clone()).collect();
            match translate_categories_auto(self.translator, &records, source_lang, target_lang).await {
                Ok(translated) => {
                    for (item, category) in batch.iter().zip(&translated) {
                        store.write_at(
                            &target_dir.join(file_label(&item.file)),
                            category,
                            WriteMode::Overwrite,
                        )?;
                        progress.mark_completed(&category.id);
                        self.progress.save(&key, &progress)?;
                        written += 1;
                    }
                    self.reporter.success(&format!(
                        "Batch complete. Saved {} categories",
                        translated.len()
                    ));
                }
                Err(e) => {
                    for item in batch {
                        progress.mark_failed(&item.record.id, &e.to_string());
                    }
                    self.progress.save(&key, &progress)?;
                    self.reporter.error(&format!("Error translating batch: {e}"));
                    return Err(PipelineError::BatchFailed {
                        count: batch.len(),
                        source: e,
                    });
                }
            }
        }

        self.reporter.summary(&format!(
            "Auto-translation complete: {written} categories translated, {} total",
            progress.completed.len()
        ));
        self.finish(&key, &progress, "category(ies)")?;
        Ok(RunSummary {
            written,
            skipped: total - work.len(),
            problems: progress.failed.len(),
            warnings: 0,
        })
    }

    /// Load the ledger and announce a resumed session.
    fn load_progress(&self, key: &SessionKey) -> Result<TranslationProgress> {
        let progress = self.progress.load(key)?;
        if !progress.completed.is_empty() || !progress.failed.is_empty() {
            self.reporter.summary(&format!(
                "Resuming previous translation: {} completed, {} failed",
                progress.completed.len(),
                progress.failed.len()
            ));
        }
        Ok(progress)
    }

    /// What: Read the source records the ledger still lists as pending.
    ///
    /// Output:
    /// - Pending items in file-name order and the total number of source files.
    fn work_list<R: crate::model::Record>(
        &self,
        source_dir: &Path,
        progress: &TranslationProgress,
        id: impl Fn(&R) -> &String,
    ) -> Result<(Vec<WorkItem<R>>, usize)> {
        let files = list_json_files(source_dir)?;
        let total = files.len();
        let mut work = Vec::new();
        for file in files {
            let record: R = read_record(&file)?;
            if progress.is_pending(id(&record), self.options.skip_failed) {
                work.push(WorkItem { file, record });
            }
        }
        Ok((work, total))
    }

    /// Clear a clean ledger, or report what is still outstanding.
    fn finish(&self, key: &SessionKey, progress: &TranslationProgress, noun: &str) -> Result<()> {
        if progress.failed.is_empty() {
            self.progress.clear(key)
        } else {
            let hint = if self.options.skip_failed {
                "Run again without --skip-failed to retry them."
            } else {
                "To retry, run the command again."
            };
            self.reporter.warn(&format!("{} {noun} failed. {hint}", progress.failed.len()));
            Ok(())
        }
    }
}
