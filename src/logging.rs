//! Tracing setup
//!
//! The terminal belongs to the TUI, so log lines go to
//! `<cache dir>/lantern/lantern.log`. Filter with `LANTERN_LOG`
//! (EnvFilter syntax, default `lantern=info`).

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "LANTERN_LOG";

const DEFAULT_FILTER: &str = "lantern=info";

/// Default log file location
pub fn log_path() -> Option<PathBuf> {
    crate::config::cache_root().map(|dir| dir.join("lantern.log"))
}

/// Install the global subscriber writing to `path`
///
/// Fails silently: logging is optional and must never block startup.
/// Returns whether a subscriber was installed.
pub fn init(path: &Path) -> bool {
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return false;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(path = %path.display(), "logging initialized");
    }
    installed
}
