//! `translation` command handlers.

use content_pipeline::pipeline::translations::{
    AutoOptions, AutoTranslation, init_translations, update_translations,
};
use content_pipeline::report::ConsoleReporter;
use content_pipeline::settings::Settings;
use content_pipeline::translate::client::HttpTranslator;
use content_pipeline::translate::progress::FileProgressStore;
use content_pipeline::{PipelineError, Result};

use crate::args::definition::TranslationCommand;
use crate::args::utils::split_scope;

/// What: Run a `translation` action.
///
/// Inputs:
/// - `action`: Selected action
/// - `settings`: Resolved settings
///
/// Output:
/// - `Ok(())` also when `update` or `auto` recorded per-item problems.
///
/// # Errors
/// - Returns `Err` on precondition failures, the first strict translation
///   gap, or a failed category batch.
pub async fn handle(action: &TranslationCommand, settings: &Settings) -> Result<()> {
    let layout = settings.layout();
    let reporter = ConsoleReporter;
    match action {
        TranslationCommand::Init { args } => {
            let scope = split_scope(args, 2)?;
            let (source, target) = (scope.langs[0], scope.langs[1]);
            tracing::info!(
                manufacturer = scope.manufacturer.unwrap_or("-"),
                source,
                target,
                "translation init requested from CLI"
            );
            init_translations(&layout, &reporter, scope.manufacturer, source, target)?;
        }
        TranslationCommand::Update { args } => {
            let scope = split_scope(args, 1)?;
            let target = scope.langs[0];
            tracing::info!(
                manufacturer = scope.manufacturer.unwrap_or("-"),
                target,
                "translation update requested from CLI"
            );
            update_translations(&layout, &reporter, scope.manufacturer, target)?;
        }
        TranslationCommand::Auto { args, skip_failed } => {
            let scope = split_scope(args, 2)?;
            let (source, target) = (scope.langs[0], scope.langs[1]);
            tracing::info!(
                manufacturer = scope.manufacturer.unwrap_or("-"),
                source,
                target,
                endpoint = %settings.endpoint,
                skip_failed,
                "translation auto requested from CLI"
            );
            let translator = HttpTranslator::new(settings.endpoint.clone(), settings.request_timeout)
                .map_err(PipelineError::from)?;
            let progress = FileProgressStore::new(settings.progress_dir.clone());
            let options = AutoOptions {
                skip_failed: *skip_failed,
                category_batch_size: settings.category_batch_size,
            };
            AutoTranslation::new(&layout, &reporter, &progress, &translator, options)
                .run(scope.manufacturer, source, target)
                .await?;
        }
    }
    Ok(())
}
