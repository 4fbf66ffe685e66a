//! Background data plumbing for slow lenses
//!
//! - [`Snapshot`] / [`SnapshotCache`]: immutable result sets behind an atomic swap
//! - [`Store`]: durable on-disk copy of the latest snapshot
//! - [`Refresher`]: single-flight recompute + swap + persist
//! - [`DebouncedSearch`]: query-keyed remote search with one fetch in flight

mod debounce;
mod refresher;
mod snapshot;
mod store;

pub use debounce::{DebouncedSearch, Fetcher, SearchState};
pub use refresher::{RefreshState, Refresher, Source, StartupRefresh};
pub use snapshot::{Snapshot, SnapshotCache};
pub use store::{JsonStore, Store, read_file, write_file};

use std::io;
use thiserror::Error;

/// Errors from background computations (crawls, downloads, remote search)
///
/// These never reach the interaction loop; they are logged and the prior
/// data is kept.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not configured: {0}")]
    Config(String),
}

/// Errors from the durable cache
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No cache file")]
    Missing,

    #[error("Cache file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
