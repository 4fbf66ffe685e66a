//! Immutable snapshots behind an atomic reference swap

use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;

/// One completed computation pass
///
/// Never edited after construction; a refresh builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    items: Vec<T>,
    taken_at: SystemTime,
}

impl<T> Snapshot<T> {
    /// Snapshot stamped with the current time
    pub fn new(items: Vec<T>) -> Self {
        Self::taken_at(items, SystemTime::now())
    }

    /// Snapshot with an explicit timestamp (e.g., a cache file's mtime)
    pub fn taken_at(items: Vec<T>, taken_at: SystemTime) -> Self {
        Self { items, taken_at }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the pass that produced this snapshot finished
    pub fn timestamp(&self) -> SystemTime {
        self.taken_at
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Holder of the one current snapshot for a data source
///
/// Readers get a reference-counted handle and iterate without any lock;
/// writers swap the whole snapshot at once.
#[derive(Debug)]
pub struct SnapshotCache<T> {
    current: ArcSwap<Snapshot<T>>,
}

impl<T> SnapshotCache<T> {
    pub fn new(initial: Snapshot<T>) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// O(1) handle to the current snapshot
    pub fn current(&self) -> Arc<Snapshot<T>> {
        self.current.load_full()
    }

    /// Replace the current snapshot, returning the previous one
    pub fn replace(&self, next: Arc<Snapshot<T>>) -> Arc<Snapshot<T>> {
        self.current.swap(next)
    }
}

impl<T> Default for SnapshotCache<T> {
    fn default() -> Self {
        Self::new(Snapshot::empty())
    }
}
