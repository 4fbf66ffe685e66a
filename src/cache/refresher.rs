//! Single-flight background refresher
//!
//! Owns the [`SnapshotCache`] of one slow data source. At most one
//! computation runs at a time; a trigger while one runs is dropped.
//! Completed passes are swapped in atomically and persisted on a
//! separate thread that nobody waits for. Saves run one at a time and a
//! save is skipped once a newer pass has completed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::{RefreshError, Snapshot, SnapshotCache, Store, StoreError};

/// Authoritative origin of a data source (filesystem crawl, download...)
pub trait Source<T>: Send + Sync {
    /// Produce a brand-new item sequence; may block on I/O
    fn compute(&self) -> Result<Vec<T>, RefreshError>;
}

/// When [`Refresher::open`] kicks a refresh by itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupRefresh {
    /// Always recompute after loading the durable cache
    Always,
    /// Recompute only when the durable cache is missing or corrupt
    WhenCold,
    /// Only on explicit [`Refresher::trigger_refresh`]
    Never,
}

/// Single-flight guard
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshState {
    pub running: bool,
}

struct Inner<T> {
    name: String,
    source: Box<dyn Source<T>>,
    store: Option<Box<dyn Store<T>>>,
    cache: SnapshotCache<T>,
    loaded: Arc<Snapshot<T>>,
    state: Mutex<RefreshState>,
    idle: Condvar,
    passes: AtomicU64,
    /// Successful passes; numbers the snapshots handed to `persist`
    completed: AtomicU64,
    persisting: Mutex<()>,
}

/// Always-available, eventually-fresh view of a slow data source
pub struct Refresher<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Refresher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Refresher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refresher")
            .field("name", &self.inner.name)
            .field("state", &*self.inner.state.lock())
            .field("passes", &self.inner.passes.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> Refresher<T>
where
    T: Send + Sync + 'static,
{
    /// Load the durable cache and apply the startup policy
    ///
    /// A missing or corrupt cache starts empty; unless the policy is
    /// [`StartupRefresh::Never`] that also triggers a refresh.
    pub fn open(
        name: impl Into<String>,
        source: Box<dyn Source<T>>,
        store: Option<Box<dyn Store<T>>>,
        policy: StartupRefresh,
    ) -> Self {
        let name = name.into();
        let (loaded, cold) = match store.as_ref().map(|s| s.load()) {
            Some(Ok(snapshot)) => {
                tracing::debug!(source = %name, items = snapshot.len(), "loaded durable cache");
                (snapshot, false)
            }
            Some(Err(StoreError::Missing)) | None => (Snapshot::empty(), true),
            Some(Err(e)) => {
                tracing::warn!(source = %name, error = %e, "durable cache unusable, starting empty");
                (Snapshot::empty(), true)
            }
        };

        let loaded = Arc::new(loaded);
        let cache = SnapshotCache::default();
        cache.replace(Arc::clone(&loaded));
        let refresher = Self {
            inner: Arc::new(Inner {
                name,
                source,
                store,
                cache,
                loaded,
                state: Mutex::new(RefreshState::default()),
                idle: Condvar::new(),
                passes: AtomicU64::new(0),
                completed: AtomicU64::new(0),
                persisting: Mutex::new(()),
            }),
        };

        let kick = match policy {
            StartupRefresh::Always => true,
            StartupRefresh::WhenCold => cold,
            StartupRefresh::Never => false,
        };
        if kick {
            refresher.trigger_refresh();
        }
        refresher
    }

    /// Snapshot read from durable storage at construction
    pub fn loaded(&self) -> Arc<Snapshot<T>> {
        Arc::clone(&self.inner.loaded)
    }

    /// Current in-memory snapshot; never waits for a refresh
    pub fn current(&self) -> Arc<Snapshot<T>> {
        self.inner.cache.current()
    }

    /// Request a recompute
    ///
    /// Returns `false` when a refresh is already running (the request is
    /// dropped, not queued) or the worker could not be started.
    pub fn trigger_refresh(&self) -> bool {
        {
            let mut state = self.inner.state.lock();
            if state.running {
                tracing::debug!(source = %self.inner.name, "refresh already running, dropped");
                return false;
            }
            state.running = true;
        }

        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name(format!("refresh-{}", self.inner.name))
            .spawn(move || run_pass(inner));

        match spawned {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(source = %self.inner.name, error = %e, "could not start refresh");
                self.inner.finish();
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.state.lock().running
    }

    /// Number of computation passes started so far
    pub fn passes(&self) -> u64 {
        self.inner.passes.load(Ordering::SeqCst)
    }

    /// Number of passes whose snapshot was swapped in
    pub fn revision(&self) -> u64 {
        self.inner.completed.load(Ordering::SeqCst)
    }

    /// Block until no refresh is running; `false` on timeout
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.inner.state.lock();
        while state.running {
            if self.inner.idle.wait_until(&mut state, deadline).timed_out() {
                return !state.running;
            }
        }
        true
    }
}

impl<T> Inner<T> {
    fn finish(&self) {
        self.state.lock().running = false;
        self.idle.notify_all();
    }
}

fn run_pass<T>(inner: Arc<Inner<T>>)
where
    T: Send + Sync + 'static,
{
    let _running = scopeguard::guard(Arc::clone(&inner), |inner| inner.finish());

    inner.passes.fetch_add(1, Ordering::SeqCst);
    let started = Instant::now();

    match inner.source.compute() {
        Ok(items) => {
            let snapshot = Arc::new(Snapshot::new(items));
            inner.cache.replace(Arc::clone(&snapshot));
            let seq = inner.completed.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::info!(
                source = %inner.name,
                items = snapshot.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "refresh complete"
            );
            persist(&inner, snapshot, seq);
        }
        Err(e) => {
            tracing::warn!(source = %inner.name, error = %e, "refresh failed, keeping previous snapshot");
        }
    }
}

/// Best-effort write of a fresh snapshot on its own thread
fn persist<T>(inner: &Arc<Inner<T>>, snapshot: Arc<Snapshot<T>>, seq: u64)
where
    T: Send + Sync + 'static,
{
    if inner.store.is_none() {
        return;
    }
    let inner = Arc::clone(inner);
    let spawned = thread::Builder::new()
        .name(format!("persist-{}", inner.name))
        .spawn(move || {
            let _saving = inner.persisting.lock();
            if inner.completed.load(Ordering::SeqCst) > seq {
                tracing::debug!(source = %inner.name, seq, "newer snapshot completed, save skipped");
                return;
            }
            if let Some(store) = inner.store.as_ref()
                && let Err(e) = store.save(snapshot.items())
            {
                tracing::warn!(source = %inner.name, error = %e, "failed to persist snapshot");
            }
        });
    if let Err(e) = spawned {
        tracing::debug!(error = %e, "could not start persist thread");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc::{self, Receiver, Sender};

    const WAIT: Duration = Duration::from_secs(5);

    /// Source that blocks each pass until the test releases it
    struct Gated {
        calls: Arc<AtomicUsize>,
        gate: Mutex<Receiver<Vec<u32>>>,
    }

    impl Source<u32> for Gated {
        fn compute(&self) -> Result<Vec<u32>, RefreshError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate
                .lock()
                .recv()
                .map_err(|_| RefreshError::Config("gate closed".to_string()))
        }
    }

    fn gated() -> (Box<Gated>, Sender<Vec<u32>>, Arc<AtomicUsize>) {
        let (tx, rx) = mpsc::channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Box::new(Gated {
            calls: Arc::clone(&calls),
            gate: Mutex::new(rx),
        });
        (source, tx, calls)
    }

    struct Failing;

    impl Source<u32> for Failing {
        fn compute(&self) -> Result<Vec<u32>, RefreshError> {
            Err(RefreshError::Config("offline".to_string()))
        }
    }

    /// Store with fixed load result that reports saves on a channel
    struct Recording {
        initial: Option<Vec<u32>>,
        corrupt: bool,
        saved: Mutex<Sender<Vec<u32>>>,
    }

    impl Store<u32> for Recording {
        fn load(&self) -> Result<Snapshot<u32>, StoreError> {
            if self.corrupt {
                let err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
                return Err(StoreError::Corrupt(err));
            }
            self.initial
                .clone()
                .map(Snapshot::new)
                .ok_or(StoreError::Missing)
        }

        fn save(&self, items: &[u32]) -> Result<(), StoreError> {
            let _ = self.saved.lock().send(items.to_vec());
            Ok(())
        }
    }

    fn recording(initial: Option<Vec<u32>>, corrupt: bool) -> (Box<Recording>, Receiver<Vec<u32>>) {
        let (tx, rx) = mpsc::channel();
        let store = Box::new(Recording {
            initial,
            corrupt,
            saved: Mutex::new(tx),
        });
        (store, rx)
    }

    /// Store whose first save blocks until released; reports every save
    struct SlowFirstSave {
        saved: Mutex<Sender<Vec<u32>>>,
        release: Mutex<Option<Receiver<()>>>,
    }

    impl Store<u32> for SlowFirstSave {
        fn load(&self) -> Result<Snapshot<u32>, StoreError> {
            Err(StoreError::Missing)
        }

        fn save(&self, items: &[u32]) -> Result<(), StoreError> {
            let _ = self.saved.lock().send(items.to_vec());
            if let Some(release) = self.release.lock().take() {
                let _ = release.recv();
            }
            Ok(())
        }
    }

    #[test]
    fn test_open_serves_durable_cache() {
        let (source, _tx, calls) = gated();
        let (store, _saved) = recording(Some(vec![7, 8]), false);
        let r = Refresher::open("t", source, Some(store), StartupRefresh::Never);

        assert_eq!(r.loaded().items(), &[7, 8]);
        assert_eq!(r.current().items(), &[7, 8]);
        assert!(!r.is_running());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_refresh_swaps_and_persists() {
        let (source, tx, _calls) = gated();
        let (store, saved) = recording(Some(vec![1]), false);
        let r = Refresher::open("t", source, Some(store), StartupRefresh::Never);

        assert!(r.trigger_refresh());
        // Still the old snapshot while the pass is blocked
        assert_eq!(r.current().items(), &[1]);

        tx.send(vec![2, 3]).unwrap();
        assert!(r.wait_idle(WAIT));
        assert_eq!(r.current().items(), &[2, 3]);
        assert_eq!(r.revision(), 1);
        assert_eq!(saved.recv_timeout(WAIT).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_saves_are_serialized_and_stale_ones_skipped() {
        let (source, tx, _calls) = gated();
        let (saved_tx, saved) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let store = Box::new(SlowFirstSave {
            saved: Mutex::new(saved_tx),
            release: Mutex::new(Some(release_rx)),
        });
        let r = Refresher::open("t", source, Some(store), StartupRefresh::Never);

        assert!(r.trigger_refresh());
        tx.send(vec![1]).unwrap();
        assert!(r.wait_idle(WAIT));
        // First save is now in progress and blocked
        assert_eq!(saved.recv_timeout(WAIT).unwrap(), vec![1]);

        for items in [vec![2], vec![3]] {
            assert!(r.trigger_refresh());
            tx.send(items).unwrap();
            assert!(r.wait_idle(WAIT));
        }
        assert!(saved.try_recv().is_err());

        release_tx.send(()).unwrap();
        assert_eq!(saved.recv_timeout(WAIT).unwrap(), vec![3]);
        assert!(saved.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_trigger_while_running_is_dropped() {
        let (source, tx, calls) = gated();
        let r = Refresher::open("t", source, None, StartupRefresh::Never);

        assert!(r.trigger_refresh());
        assert!(!r.trigger_refresh());
        assert!(!r.trigger_refresh());

        tx.send(vec![1]).unwrap();
        assert!(r.wait_idle(WAIT));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(r.passes(), 1);

        // Idle again: a new trigger runs a new pass
        assert!(r.trigger_refresh());
        tx.send(vec![2]).unwrap();
        assert!(r.wait_idle(WAIT));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let (store, saved) = recording(Some(vec![4, 5]), false);
        let r = Refresher::open("t", Box::new(Failing), Some(store), StartupRefresh::Always);

        assert!(r.wait_idle(WAIT));
        assert_eq!(r.current().items(), &[4, 5]);
        assert_eq!(r.revision(), 0);
        assert!(!r.is_running());
        assert!(saved.try_recv().is_err());
    }

    #[test]
    fn test_corrupt_cache_starts_empty_and_refreshes() {
        let (source, tx, calls) = gated();
        let (store, _saved) = recording(None, true);
        let r = Refresher::open("t", source, Some(store), StartupRefresh::WhenCold);

        assert!(r.loaded().is_empty());
        assert!(r.current().is_empty());
        tx.send(vec![9]).unwrap();
        assert!(r.wait_idle(WAIT));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(r.current().items(), &[9]);
    }

    #[test]
    fn test_warm_cache_skips_when_cold_refresh() {
        let (source, _tx, calls) = gated();
        let (store, _saved) = recording(Some(vec![1]), false);
        let r = Refresher::open("t", source, Some(store), StartupRefresh::WhenCold);

        assert!(!r.is_running());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wait_idle_times_out_while_blocked() {
        let (source, tx, _calls) = gated();
        let r = Refresher::open("t", source, None, StartupRefresh::Always);

        assert!(!r.wait_idle(Duration::from_millis(20)));
        tx.send(Vec::new()).unwrap();
        assert!(r.wait_idle(WAIT));
    }
}
