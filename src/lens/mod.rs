//! Lens contract
//!
//! A lens is one pluggable search-and-act data source. The interaction
//! loop only ever talks to lenses through [`Lens`], routed by a
//! [`LensRegistry`].

pub mod clipboard;
pub mod launch;
mod registry;

pub use registry::LensRegistry;

use std::io;
use thiserror::Error;

use crate::model::{ActionKind, ContextAction, Entry};

/// Errors returned synchronously by lens operations
#[derive(Error, Debug)]
pub enum LensError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No entry named '{0}'")]
    UnknownEntry(String),

    #[error("Action not supported: {0}")]
    Unsupported(String),
}

/// A searchable data source
///
/// `search` must answer from memory: slow work belongs to a
/// [`Refresher`](crate::cache::Refresher) or a
/// [`DebouncedSearch`](crate::cache::DebouncedSearch) owned by the lens.
/// No lens may hold a lock of its own across I/O that another lens could
/// wait on.
pub trait Lens {
    /// Stable display label
    fn name(&self) -> &str;

    /// Entries matching `query`
    ///
    /// An empty query yields the lens's default listing, possibly empty.
    /// "No matches" is `Ok(vec![])`; `Err` means the lens itself is broken.
    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError>;

    /// Primary action for a chosen entry (launch, open, copy...)
    fn enter(&self, entry: &Entry) -> Result<(), LensError>;

    /// Secondary actions for an entry, possibly none
    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction>;

    /// Execute a context action previously produced by [`Lens::context_actions`]
    ///
    /// The default handles the lens-independent kinds. Lenses with
    /// background data override this to serve [`ActionKind::Refresh`].
    fn run_action(&self, action: &ContextAction) -> Result<(), LensError> {
        run_standard_action(self.name(), action)
    }

    /// Changes whenever background work may have changed `search` results
    ///
    /// The idle tick searches again only when this moved. Lenses without
    /// background data keep the default.
    fn revision(&self) -> u64 {
        0
    }
}

/// Execute the lens-independent action kinds
pub fn run_standard_action(lens_name: &str, action: &ContextAction) -> Result<(), LensError> {
    match &action.kind {
        ActionKind::Command(command) => launch::spawn_shell(command),
        ActionKind::Copy(text) => clipboard::copy_to_clipboard(text),
        ActionKind::Open(target) => launch::open(target),
        ActionKind::Refresh => Err(LensError::Unsupported(format!(
            "{} has nothing to refresh",
            lens_name
        ))),
    }
}

/// Case-insensitive substring match used by the local lenses
pub fn matches_query(haystack: &str, query: &str) -> bool {
    query.is_empty() || haystack.to_lowercase().contains(query)
}

/// Normalize a raw query for [`matches_query`]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
