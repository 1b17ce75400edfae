//! country-atlas binary entrypoint kept minimal. Commands live in `args`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;
use country_atlas::args::{Args, determine_log_level, process_args};
use country_atlas::config::logs_dir;

struct AtlasTimer;

impl tracing_subscriber::fmt::time::FormatTime for AtlasTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.format("%Y-%m-%d-T %H:%M:%S"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Filter from `RUST_LOG`, falling back to the command-line level.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Initialize tracing into the log file, or stderr when it cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = logs_dir();
    log_path.push("country-atlas.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AtlasTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger, warnings only unless asked otherwise
            tracing_subscriber::fmt()
                .with_env_filter(env_filter("warn"))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(AtlasTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&determine_log_level(&args));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "country-atlas starting");
    let code = process_args(&args).await;
    tracing::info!(code, "country-atlas exited");
    std::process::exit(code);
}
