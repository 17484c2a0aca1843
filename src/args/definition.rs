//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use content_pipeline::Result;
use content_pipeline::settings::Settings;

/// content-pipeline - Build term dictionaries and translate catalog content between languages
#[derive(Parser, Debug)]
#[command(name = "content-pipeline")]
#[command(version)]
#[command(about = "Build term dictionaries and translate catalog content between languages", long_about = None)]
pub struct Args {
    /// Project root holding content/, scraped/ and pipeline.conf
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Translation endpoint (overrides pipeline.conf and GONDOR_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Timeout in seconds for each translation request
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scraped input and record files
    Content {
        /// Content action
        #[command(subcommand)]
        action: ContentCommand,
    },
    /// Term dictionaries
    Dictionary {
        /// Dictionary action
        #[command(subcommand)]
        action: DictionaryCommand,
    },
    /// Translation of record files
    Translation {
        /// Translation action
        #[command(subcommand)]
        action: TranslationCommand,
    },
}

/// `content` actions.
#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// Write scraped JSONL records to per-language files (overwrites)
    Ingest,
    /// List products of a manufacturer ("default" for the legacy layout)
    List {
        /// Manufacturer id
        manufacturer: String,
        /// Language code
        lang: String,
    },
    /// Print one product as JSON
    Show {
        /// Manufacturer id
        manufacturer: String,
        /// Language code
        lang: String,
        /// Product id
        id: String,
    },
}

/// `dictionary` actions.
#[derive(Subcommand, Debug)]
pub enum DictionaryCommand {
    /// Build dictionaries for every manufacturer and language in the scraped input
    Build,
    /// Copy missing keys from one language's dictionaries to another's
    Sync {
        /// [MANUFACTURER] SOURCE_LANG TARGET_LANG (omit manufacturer for the legacy layout)
        #[arg(required = true, num_args = 2..=3, value_name = "ARGS")]
        args: Vec<String>,
    },
}

/// `translation` actions.
#[derive(Subcommand, Debug)]
pub enum TranslationCommand {
    /// Translate records through dictionaries, stopping at the first missing term
    Init {
        /// [MANUFACTURER] SOURCE_LANG TARGET_LANG
        #[arg(required = true, num_args = 2..=3, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Re-apply dictionaries to existing target records, keeping unknown terms
    Update {
        /// [MANUFACTURER] TARGET_LANG
        #[arg(required = true, num_args = 1..=2, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Machine-translate records with resumable progress
    Auto {
        /// [MANUFACTURER] SOURCE_LANG TARGET_LANG
        #[arg(required = true, num_args = 2..=3, value_name = "ARGS")]
        args: Vec<String>,
        /// Do not retry items that failed in an earlier run
        #[arg(long)]
        skip_failed: bool,
    },
}

/// What: Run the command selected on the command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `settings`: Resolved settings
///
/// Output:
/// - `Ok(())` when the command finished, even with recorded non-fatal problems.
///
/// # Errors
/// - Returns the fatal error of the command.
pub async fn process_args(args: &Args, settings: &Settings) -> Result<()> {
    use crate::args::{content, dictionary, translation};

    match &args.command {
        Command::Content { action } => content::handle(action, settings),
        Command::Dictionary { action } => dictionary::handle(action, settings),
        Command::Translation { action } => translation::handle(action, settings).await,
    }
}
