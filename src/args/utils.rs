//! Shared utilities for argument processing.

use content_pipeline::{PipelineError, Result};

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// Positional arguments split into an optional manufacturer and languages.
#[derive(Debug, PartialEq, Eq)]
pub struct Scope<'a> {
    /// Manufacturer, or `None` for the legacy layout.
    pub manufacturer: Option<&'a str>,
    /// Language codes in the order given.
    pub langs: Vec<&'a str>,
}

/// What: Split `[manufacturer] lang...` positionals.
///
/// Inputs:
/// - `args`: Positional values
/// - `langs`: Number of language codes the command takes
///
/// Output:
/// - The manufacturer when one extra value precedes the languages.
///
/// # Errors
/// - Returns `InvalidArguments` when the count is neither `langs` nor `langs + 1`.
pub fn split_scope(args: &[String], langs: usize) -> Result<Scope<'_>> {
    let values: Vec<&str> = args.iter().map(String::as_str).collect();
    if values.len() == langs {
        Ok(Scope {
            manufacturer: None,
            langs: values,
        })
    } else if values.len() == langs + 1 {
        Ok(Scope {
            manufacturer: Some(values[0]),
            langs: values[1..].to_vec(),
        })
    } else {
        Err(PipelineError::InvalidArguments(format!(
            "expected [manufacturer] followed by {langs} language code(s), got {} value(s)",
            values.len()
        )))
    }
}
