//! Tracing setup for the `quickpick` binary.
//!
//! The picker draws on stderr, so logs only ever go to a file. Nothing is
//! installed unless a file is named by `--log-file` or `QUICKPICK_LOG`.
//!
//! Filter priority: `QUICKPICK_LOG_LEVEL`, then `RUST_LOG`, then
//! [`DEFAULT_DIRECTIVES`].

use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use color_eyre::eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_FILE_ENV: &str = "QUICKPICK_LOG";
pub const LOG_LEVEL_ENV: &str = "QUICKPICK_LOG_LEVEL";
pub const DEFAULT_DIRECTIVES: &str = "warn,quickpick_core=debug,quickpick_tui=debug";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = resolve_log_file(log_file) else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
        .try_init();

    Ok(Some(guard))
}

fn resolve_log_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    std::env::var_os(LOG_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn build_env_filter() -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_LEVEL_ENV)
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(DEFAULT_DIRECTIVES)
}
