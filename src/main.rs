//! content-pipeline binary entrypoint: logging setup, settings, command dispatch.

mod args;

use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use content_pipeline::settings::{ENDPOINT_ENV, Overrides, Settings};

/// Log line timestamps in local time.
struct PipelineTimer;

impl tracing_subscriber::fmt::time::FormatTime for PipelineTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&content_pipeline::util::log_timestamp())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to `{log_dir}/content-pipeline.log`, or stderr.
///
/// Inputs:
/// - `log_dir`: Directory for the log file
/// - `level`: Default filter when `RUST_LOG` is unset
///
/// Details:
/// - The non-blocking writer's guard is kept in `LOG_GUARD` for the process lifetime.
fn init_logging(log_dir: &Path, level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = log_dir.join("content-pipeline.log");
    let file = std::fs::create_dir_all(log_dir).and_then(|()| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });
    match file {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(PipelineTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: log to stderr so commands still run on a read-only root
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(PipelineTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = args::Args::parse();
    let level = args::determine_log_level(&args);
    init_logging(&Settings::defaults(&args.root).log_dir, &level);

    let overrides = Overrides {
        endpoint: args.endpoint.clone(),
        timeout_secs: args.timeout_secs,
    };
    let settings = match Settings::load(&args.root, std::env::var(ENDPOINT_ENV).ok(), &overrides) {
        Ok(s) => s,
        Err(err) => {
            tracing::error!(error = %err, "failed to load settings");
            eprintln!("✗ {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(root = %settings.root.display(), command = ?args.command, "content-pipeline starting");
    let code = match args::process_args(&args, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("✗ {err}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("content-pipeline exited");
    code
}
