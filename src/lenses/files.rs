//! Files lens
//!
//! Serves a crawl of the home directory from a [`Refresher`]. The durable
//! index at `<cache>/lantern/files/index.json` makes cold start instant;
//! a fresh crawl is kicked at every startup.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use walkdir::WalkDir;

use crate::cache::{JsonStore, RefreshError, Refresher, Source, StartupRefresh, Store};
use crate::config::{self, FilesConfig};
use crate::lens::{self, Lens, LensError, launch};
use crate::model::{ActionKind, ContextAction, Entry};

pub const NAME: &str = "Files";
/// Cache/config namespace
pub const NAMESPACE: &str = "files";
const ICON: &str = "󰈔";
const HIDDEN_MARKER: char = '.';
const HOME_MARKER: &str = "~";

/// Recursive crawl of one root directory
#[derive(Debug, Clone)]
pub struct Crawler {
    root: PathBuf,
    files_only: bool,
}

impl Crawler {
    pub fn new(root: impl Into<PathBuf>, files_only: bool) -> Self {
        Self {
            root: root.into(),
            files_only,
        }
    }
}

impl Source<String> for Crawler {
    fn compute(&self) -> Result<Vec<String>, RefreshError> {
        crawl(&self.root, self.files_only)
    }
}

/// List everything under `root`, skipping hidden directories
///
/// The root itself is not listed and is never skipped, even when its own
/// name is hidden. Unreadable subtrees are skipped; only a missing root
/// fails the crawl.
pub fn crawl(root: &Path, files_only: bool) -> Result<Vec<String>, RefreshError> {
    if !root.is_dir() {
        return Err(RefreshError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        )));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !(entry.file_type().is_dir() && is_hidden(entry.file_name()))
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        if files_only && !entry.file_type().is_file() {
            continue;
        }
        match entry.path().to_str() {
            Some(path) => paths.push(path.to_string()),
            None => tracing::debug!(path = ?entry.path(), "skipping non UTF-8 path"),
        }
    }
    Ok(paths)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .is_some_and(|name| name.starts_with(HIDDEN_MARKER))
}

/// Display form of a path
///
/// Replaces the `home` prefix with `~` and cuts every segment except
/// the first and last to two characters: `/home/u/docs/report.txt`
/// becomes `~/do/report.txt`. Display only, never identity.
pub fn shorten_path(home: &str, full: &str) -> String {
    let sep = MAIN_SEPARATOR;
    let display = match full.strip_prefix(home) {
        Some(rest) if !home.is_empty() && (rest.is_empty() || rest.starts_with(sep)) => {
            format!("{}{}", HOME_MARKER, rest)
        }
        _ => full.to_string(),
    };

    let parts: Vec<&str> = display.split(sep).collect();
    if parts.len() <= 2 {
        return display;
    }

    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == 0 || i == last {
                (*part).to_string()
            } else {
                part.chars().take(2).collect()
            }
        })
        .collect::<Vec<String>>()
        .join(&sep.to_string())
}

/// Files lens backed by a background crawl
#[derive(Debug)]
pub struct FilesLens {
    home: String,
    index: Refresher<String>,
}

impl FilesLens {
    /// Build from `files/config.yaml` and the user's home directory
    pub fn from_config() -> Self {
        let cfg: FilesConfig = config::lens_config_dir(NAMESPACE)
            .map(|dir| config::load_or_default(&dir.join("config.yaml")))
            .unwrap_or_default();

        let home = dirs::home_dir();
        let root = cfg.root.clone().or_else(|| home.clone());
        let store = config::lens_cache_dir(NAMESPACE)
            .map(|dir| Box::new(JsonStore::<String>::new(dir.join("index.json"))) as Box<dyn Store<String>>);

        let home = home
            .and_then(|h| h.to_str().map(str::to_string))
            .unwrap_or_default();

        match root {
            Some(root) => Self::new(
                home,
                Box::new(Crawler::new(root, cfg.files_only)),
                store,
                StartupRefresh::Always,
            ),
            None => {
                tracing::warn!("no home directory, files lens serves the durable index only");
                Self::new(
                    home,
                    Box::new(Crawler::new(PathBuf::new(), cfg.files_only)),
                    store,
                    StartupRefresh::Never,
                )
            }
        }
    }

    pub fn new(
        home: impl Into<String>,
        source: Box<dyn Source<String>>,
        store: Option<Box<dyn Store<String>>>,
        policy: StartupRefresh,
    ) -> Self {
        Self {
            home: home.into(),
            index: Refresher::open(NAMESPACE, source, store, policy),
        }
    }

    /// Background index handle
    pub fn index(&self) -> &Refresher<String> {
        &self.index
    }

    fn entry_for(&self, path: &str) -> Entry {
        Entry::new(path, shorten_path(&self.home, path), ICON, path)
    }
}

impl Lens for FilesLens {
    fn name(&self) -> &str {
        NAME
    }

    fn revision(&self) -> u64 {
        self.index.revision()
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        let query = lens::normalize_query(query);
        let snapshot = self.index.current();
        Ok(snapshot
            .items()
            .iter()
            .filter(|path| lens::matches_query(path, &query))
            .map(|path| self.entry_for(path))
            .collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        launch::open(&entry.id)
    }

    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction> {
        vec![ContextAction::new(
            "Reindex files",
            entry.clone(),
            ActionKind::Refresh,
        )]
    }

    fn run_action(&self, action: &ContextAction) -> Result<(), LensError> {
        match action.kind {
            ActionKind::Refresh => {
                if !self.index.trigger_refresh() {
                    tracing::info!("reindex requested while a crawl is running");
                }
                Ok(())
            }
            _ => lens::run_standard_action(NAME, action),
        }
    }
}
