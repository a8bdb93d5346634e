//! Logging setup.
//!
//! Events go to `$XDG_STATE_HOME/localcopy/localcopy.log` when that file can be
//! opened; the CLI falls back to stderr otherwise. The filter comes from
//! `LOCALCOPY_LOG`, then `RUST_LOG`, then a built-in default.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info,localcopy=debug,localcopy_core=debug";
const LOG_ENV: &str = "LOCALCOPY_LOG";
const LOG_FILE_NAME: &str = "localcopy.log";

/// First non-blank of the product variable and `RUST_LOG`, else the default.
fn directives(own: Option<String>, rust_log: Option<String>) -> String {
    [own, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn env_filter() -> EnvFilter {
    let directives = directives(std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        // No subscriber yet, so this cannot go through tracing.
        eprintln!("localcopy: ignoring log filter {:?}: {}", directives, e);
        EnvFilter::new(DEFAULT_DIRECTIVES)
    })
}

/// Directory holding the log file.
pub fn log_dir() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::new().context("resolving XDG directories")?;
    Ok(dirs.get_state_home().join("localcopy"))
}

/// Opens the log file in `dir` for appending, creating `dir` if needed.
fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    Ok((path, file))
}

/// Installs a subscriber writing to the log file.
///
/// Returns an error when the file cannot be opened or a subscriber is already
/// installed; the caller decides whether to fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let (path, file) = open_log_file(&log_dir()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;

    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Installs a subscriber writing to stderr. Does nothing if one is already installed.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
