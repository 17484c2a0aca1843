//! `dictionary` command handlers.

use content_pipeline::Result;
use content_pipeline::pipeline::dictionaries::{build_all_dictionaries, sync_dictionaries};
use content_pipeline::report::ConsoleReporter;
use content_pipeline::settings::Settings;

use crate::args::definition::DictionaryCommand;
use crate::args::utils::split_scope;

/// What: Run a `dictionary` action.
///
/// Inputs:
/// - `action`: Selected action
/// - `settings`: Resolved settings
///
/// # Errors
/// - Returns `Err` when the scraped input is empty, the source dictionary set
///   is incomplete, or a file operation fails.
pub fn handle(action: &DictionaryCommand, settings: &Settings) -> Result<()> {
    let layout = settings.layout();
    let reporter = ConsoleReporter;
    match action {
        DictionaryCommand::Build => {
            tracing::info!(content = %layout.content_dir.display(), "dictionary build requested from CLI");
            build_all_dictionaries(&layout, &reporter)?;
        }
        DictionaryCommand::Sync { args } => {
            let scope = split_scope(args, 2)?;
            let (source, target) = (scope.langs[0], scope.langs[1]);
            tracing::info!(
                manufacturer = scope.manufacturer.unwrap_or("-"),
                source,
                target,
                "dictionary sync requested from CLI"
            );
            sync_dictionaries(&layout, &reporter, scope.manufacturer, source, target)?;
        }
    }
    Ok(())
}
