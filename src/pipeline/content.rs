//! Ingest of scraped JSONL into the record store.

use crate::error::{PipelineError, Result};
use crate::model::{CategoryRecord, EntityKind, ProductRecord, Record};
use crate::report::Reporter;
use crate::store::jsonl::read_jsonl;
use crate::store::scraped::discover_manufacturers;
use crate::store::{Layout, RecordStore, WriteMode};

use super::RunSummary;

/// What: Write every scraped record to its per-language file.
///
/// Inputs:
/// - `layout`: Project layout
/// - `reporter`: Progress sink
///
/// Output:
/// - Totals: records written, and rejected lines as problems.
///
/// # Errors
/// - Returns `NoManufacturers` when the scraped directory holds nothing.
/// - Returns `Err` when a file cannot be read or written.
///
/// Details:
/// - Existing record files are overwritten.
/// - Lines that fail to decode or validate are reported and skipped.
/// - An empty `manufacturer` field is filled from the scraped directory name.
pub fn ingest(layout: &Layout, reporter: &dyn Reporter) -> Result<RunSummary> {
    let manufacturers = discover_manufacturers(&layout.scraped_dir)?;
    if manufacturers.is_empty() {
        return Err(PipelineError::NoManufacturers(layout.scraped_dir.clone()));
    }
    let store = RecordStore::new(layout.clone());
    let mut summary = RunSummary::default();
    for manufacturer in &manufacturers {
        let m = manufacturer.as_deref();
        let label = m.unwrap_or(crate::sources::LEGACY_KEY);
        let products = ingest_kind::<ProductRecord>(&store, m, reporter, |p, name| {
            if p.manufacturer.is_empty() {
                p.manufacturer = name.to_string();
            }
        })?;
        let categories = ingest_kind::<CategoryRecord>(&store, m, reporter, |c, name| {
            if c.manufacturer.is_empty() {
                c.manufacturer = name.to_string();
            }
        })?;
        reporter.success(&format!(
            "{label}: {} products, {} categories ingested",
            products.written, categories.written
        ));
        summary.written += products.written + categories.written;
        summary.problems += products.problems + categories.problems;
    }
    Ok(summary)
}

/// Ingest one scraped file of records of type `R`.
fn ingest_kind<R: Record>(
    store: &RecordStore,
    manufacturer: Option<&str>,
    reporter: &dyn Reporter,
    fill: impl Fn(&mut R, &str),
) -> Result<RunSummary> {
    let path = store.layout().scraped_file(R::KIND, manufacturer);
    let Some(batch) = read_jsonl::<R, _>(&path, R::validate)? else {
        if R::KIND == EntityKind::Product {
            reporter.warn(&format!("{} not found, skipping", path.display()));
        }
        return Ok(RunSummary::default());
    };
    for rejected in &batch.rejected {
        reporter.warn(&format!(
            "{}:{}: {}",
            path.display(),
            rejected.line,
            rejected.reason
        ));
    }
    let mut summary = RunSummary {
        problems: batch.rejected.len(),
        ..RunSummary::default()
    };
    for mut record in batch.entries {
        if let Some(name) = manufacturer {
            fill(&mut record, name);
        }
        store.write(manufacturer, &record, WriteMode::Overwrite)?;
        summary.written += 1;
    }
    tracing::info!(
        path = %path.display(),
        written = summary.written,
        rejected = summary.problems,
        "ingested scraped records"
    );
    Ok(summary)
}
