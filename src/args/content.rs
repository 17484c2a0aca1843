//! `content` command handlers.

use content_pipeline::model::EntityKind;
use content_pipeline::pipeline::content::ingest;
use content_pipeline::report::{ConsoleReporter, Reporter};
use content_pipeline::settings::Settings;
use content_pipeline::sources::{LEGACY_KEY, SourceRegistry};
use content_pipeline::store::to_pretty_json;
use content_pipeline::{PipelineError, Result};

use crate::args::definition::ContentCommand;

/// What: Run a `content` action.
///
/// Inputs:
/// - `action`: Selected action
/// - `settings`: Resolved settings
///
/// # Errors
/// - Returns `Err` on a fatal ingest error, an unknown manufacturer, or a
///   missing product.
pub fn handle(action: &ContentCommand, settings: &Settings) -> Result<()> {
    let layout = settings.layout();
    let reporter = ConsoleReporter;
    match action {
        ContentCommand::Ingest => {
            tracing::info!(scraped = %layout.scraped_dir.display(), "ingest requested from CLI");
            let summary = ingest(&layout, &reporter)?;
            reporter.summary(&format!(
                "Ingest complete: {} record(s) written, {} line(s) rejected",
                summary.written, summary.problems
            ));
        }
        ContentCommand::List { manufacturer, lang } => {
            let registry = SourceRegistry::from_layout(&layout)?;
            let products = registry.get(manufacturer)?.list_all(lang)?;
            for product in &products {
                println!("{}\t{}\t{}", product.id, product.slug, product.label());
            }
            tracing::info!(
                manufacturer = %manufacturer,
                lang = %lang,
                count = products.len(),
                "listed products"
            );
        }
        ContentCommand::Show {
            manufacturer,
            lang,
            id,
        } => {
            let registry = SourceRegistry::from_layout(&layout)?;
            let product = registry
                .get(manufacturer)?
                .get_by_id(id, lang)?
                .ok_or_else(|| {
                    PipelineError::InvalidArguments(format!(
                        "no product with id {id} in {manufacturer}/{lang}"
                    ))
                })?;
            let scope = (manufacturer != LEGACY_KEY).then_some(manufacturer.as_str());
            let path = layout.record_path(EntityKind::Product, scope, lang, &product.slug);
            let body = to_pretty_json(&product, &path)?;
            print!("{body}");
        }
    }
    Ok(())
}
