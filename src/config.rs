//! Configuration files and per-user locations
//!
//! All configuration is optional. A missing or malformed file degrades
//! the affected lens to defaults or empty data, never stops startup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Directory name used under the config and cache roots
pub const APP_NAME: &str = "lantern";

/// Result cap for remote search when none (or a non-positive one) is set
pub const DEFAULT_RESULT_LIMIT: usize = 25;

/// Errors while reading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// `<config dir>/lantern`
pub fn config_root() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// `<cache dir>/lantern`
pub fn cache_root() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_NAME))
}

/// `<config dir>/lantern/<lens>`
pub fn lens_config_dir(lens: &str) -> Option<PathBuf> {
    config_root().map(|dir| dir.join(lens))
}

/// `<cache dir>/lantern/<lens>`
pub fn lens_cache_dir(lens: &str) -> Option<PathBuf> {
    cache_root().map(|dir| dir.join(lens))
}

/// Parse a YAML file
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&data)?)
}

/// Parse a YAML file, falling back to `T::default()` on any error
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_yaml(path) {
        Ok(value) => value,
        Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            T::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            T::default()
        }
    }
}

// =============================================================================
// Applications
// =============================================================================

/// One launchable application (`applications/<name>.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub icon: String,
    pub command: String,
    pub description: String,
    pub context: Vec<ContextCommand>,
}

/// Named secondary command of an application
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContextCommand {
    pub name: String,
    pub command: String,
}

/// Load every `*.yaml` application file in `dir`, in file-name order
///
/// Files that fail to parse, or define no name, are skipped.
pub fn load_applications(dir: &Path) -> Vec<AppConfig> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "no applications directory");
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| match load_yaml::<AppConfig>(path) {
            Ok(app) if !app.name.is_empty() => Some(app),
            Ok(_) => {
                tracing::warn!(path = %path.display(), "application without a name skipped");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "application file skipped");
                None
            }
        })
        .collect()
}

// =============================================================================
// Web search
// =============================================================================

/// Remote search endpoint (`websearch/config.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    #[serde(alias = "ip")]
    pub host: String,
    pub port: u16,
    pub limit: i64,
}

impl WebSearchConfig {
    /// Effective result cap
    pub fn result_limit(&self) -> usize {
        if self.limit <= 0 {
            DEFAULT_RESULT_LIMIT
        } else {
            self.limit as usize
        }
    }

    /// Whether host and port are both set
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && self.port != 0
    }
}

// =============================================================================
// Files
// =============================================================================

/// Filesystem index options (`files/config.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// List regular files only (directories are listed too by default)
    pub files_only: bool,
    /// Crawl root; defaults to the home directory
    pub root: Option<PathBuf>,
}
