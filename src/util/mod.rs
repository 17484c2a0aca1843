//! Small shared helpers.

pub mod config;

/// What: Current local time formatted for log lines.
///
/// Inputs: None
///
/// Output:
/// - `YYYY-MM-DD-THH:MM:SS` in local time.
#[must_use]
pub fn log_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d-T%H:%M:%S").to_string()
}
