//! Operator-facing progress reporting.
//!
//! Pipeline stages never print directly; they talk to a [`Reporter`]. The
//! console implementation prints marker-prefixed lines and mirrors them to
//! `tracing`, the recording implementation keeps them for assertions.

use std::sync::Mutex;

/// Kind of a reported line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportLevel {
    /// Neutral progress message.
    Info,
    /// An item or step completed.
    Success,
    /// An item was skipped on purpose.
    Skipped,
    /// Recoverable problem.
    Warn,
    /// Failure of an item or of the command.
    Error,
    /// End-of-run totals or a resumed session.
    Summary,
}

impl ReportLevel {
    /// Console marker printed before the message.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Skipped => "⊘ ",
            Self::Warn => "⚠ ",
            Self::Error => "✗ ",
            Self::Summary => "📋 ",
        }
    }
}

/// Sink for operator-facing messages.
pub trait Reporter: Send + Sync {
    /// Emit one line at `level`.
    fn report(&self, level: ReportLevel, message: &str);

    /// Neutral progress line.
    fn info(&self, message: &str) {
        self.report(ReportLevel::Info, message);
    }

    /// Completed item or step.
    fn success(&self, message: &str) {
        self.report(ReportLevel::Success, message);
    }

    /// Deliberately skipped item.
    fn skipped(&self, message: &str) {
        self.report(ReportLevel::Skipped, message);
    }

    /// Recoverable problem.
    fn warn(&self, message: &str) {
        self.report(ReportLevel::Warn, message);
    }

    /// Failure.
    fn error(&self, message: &str) {
        self.report(ReportLevel::Error, message);
    }

    /// Totals or resume notice.
    fn summary(&self, message: &str) {
        self.report(ReportLevel::Summary, message);
    }
}

/// Prints to stdout (errors to stderr) and mirrors every line to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        let marker = level.marker();
        match level {
            ReportLevel::Error => {
                tracing::error!("{message}");
                eprintln!("{marker}{message}");
            }
            ReportLevel::Warn => {
                tracing::warn!("{message}");
                println!("{marker}{message}");
            }
            ReportLevel::Info | ReportLevel::Success | ReportLevel::Skipped | ReportLevel::Summary => {
                tracing::info!("{message}");
                println!("{marker}{message}");
            }
        }
    }
}

/// Keeps every reported line in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Lines in report order.
    lines: Mutex<Vec<(ReportLevel, String)>>,
}

impl RecordingReporter {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line so far.
    #[must_use]
    pub fn lines(&self) -> Vec<(ReportLevel, String)> {
        self.lines
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Messages reported at `level`, in order.
    #[must_use]
    pub fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: ReportLevel, message: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push((level, message.to_string()));
        }
    }
}
