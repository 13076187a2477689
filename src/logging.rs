//! Tracing subscriber setup.
//!
//! `PROF_FINDER_LOG` takes precedence over the configured level. The TUI owns the terminal, so
//! it logs to a daily file under the data directory; one-shot commands log to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PROF_FINDER_LOG";
const LOG_FILE_PREFIX: &str = "prof-finder.log";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr, for one-shot commands
pub fn init_stderr(default_level: &str) {
    // Ignore the error when a subscriber is already installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to a daily rolling file, for the interactive UI
///
/// The returned guard flushes pending lines when dropped; keep it alive for the whole session.
pub fn init_file(log_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
