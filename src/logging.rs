//! Tracing subscriber setup.
//!
//! Filter priority: `PARKING_DASH_LOG`, then `RUST_LOG`, then the default
//! derived from `--verbose`. The dashboard logs to a file so the terminal UI
//! stays clean; the one-shot commands log to stderr.

use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PARKING_DASH_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("parking-dash.log")
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "parking_dash=debug"
    } else {
        "parking_dash=info"
    }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

/// Installs the global subscriber. Call once, early in `main`.
pub fn init_logging(target: LogTarget, verbose: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(build_env_filter(verbose));

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };

    result.map_err(|err| anyhow!("failed to initialise logging: {err}"))
}
