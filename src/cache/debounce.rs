//! Debounced remote search
//!
//! The UI calls [`DebouncedSearch::search`] on every keystroke. Each call
//! answers immediately with the last completed result set; a fetch is
//! started only when the query changed and none is in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::{RefreshError, Snapshot};

/// Remote backend for a query-driven search
pub trait Fetcher<R>: Send + Sync {
    /// Run one remote query; may block on the network
    fn fetch(&self, query: &str) -> Result<Vec<R>, RefreshError>;
}

/// Query bookkeeping guarded by one lock
///
/// `in_flight` is true only between issuing a fetch and its completion.
#[derive(Debug)]
pub struct SearchState<R> {
    pub last_query: String,
    pub in_flight: bool,
    pub results: Arc<Snapshot<R>>,
    /// Bumped whenever the query is cleared; a fetch that completes under
    /// an older generation is discarded
    generation: u64,
}

impl<R> Default for SearchState<R> {
    fn default() -> Self {
        Self {
            last_query: String::new(),
            in_flight: false,
            results: Arc::new(Snapshot::empty()),
            generation: 0,
        }
    }
}

struct Inner<R> {
    name: String,
    fetcher: Box<dyn Fetcher<R>>,
    limit: usize,
    state: Mutex<SearchState<R>>,
    idle: Condvar,
    /// Finished fetches, applied or not
    finished: AtomicU64,
}

/// Remote search that stays responsive under per-keystroke calls
pub struct DebouncedSearch<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for DebouncedSearch<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> std::fmt::Debug for DebouncedSearch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("DebouncedSearch")
            .field("name", &self.inner.name)
            .field("limit", &self.inner.limit)
            .field("last_query", &state.last_query)
            .field("in_flight", &state.in_flight)
            .field("results", &state.results.len())
            .finish()
    }
}

impl<R> DebouncedSearch<R>
where
    R: Send + Sync + 'static,
{
    /// `limit` caps how many results of one fetch are kept
    pub fn new(name: impl Into<String>, fetcher: Box<dyn Fetcher<R>>, limit: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                fetcher,
                limit,
                state: Mutex::new(SearchState::default()),
                idle: Condvar::new(),
                finished: AtomicU64::new(0),
            }),
        }
    }

    /// Answer from the cached results, kicking a fetch if warranted
    ///
    /// An empty (after trimming) query clears the query and results and
    /// never fetches.
    pub fn search(&self, query: &str) -> Arc<Snapshot<R>> {
        let query = query.trim();

        let (results, launch) = {
            let mut state = self.inner.state.lock();
            if query.is_empty() {
                state.last_query.clear();
                state.results = Arc::new(Snapshot::empty());
                state.generation += 1;
                return Arc::clone(&state.results);
            }

            let launch = if query != state.last_query && !state.in_flight {
                state.last_query = query.to_string();
                state.in_flight = true;
                Some(state.generation)
            } else {
                None
            };
            (Arc::clone(&state.results), launch)
        };

        if let Some(generation) = launch {
            self.launch(query.to_string(), generation);
        }
        results
    }

    /// Last query a fetch was started for
    pub fn last_query(&self) -> String {
        self.inner.state.lock().last_query.clone()
    }

    pub fn in_flight(&self) -> bool {
        self.inner.state.lock().in_flight
    }

    /// Last completed result set
    pub fn results(&self) -> Arc<Snapshot<R>> {
        Arc::clone(&self.inner.state.lock().results)
    }

    /// Number of fetches that have finished
    ///
    /// Moves on every completion, including dropped and failed ones, so a
    /// caller that searches again on change also starts the fetch for a
    /// query typed while the previous one was in flight.
    pub fn revision(&self) -> u64 {
        self.inner.finished.load(Ordering::SeqCst)
    }

    /// Block until no fetch is in flight; `false` on timeout
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.inner.state.lock();
        while state.in_flight {
            if self.inner.idle.wait_until(&mut state, deadline).timed_out() {
                return !state.in_flight;
            }
        }
        true
    }

    fn launch(&self, query: String, generation: u64) {
        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name(format!("search-{}", self.inner.name))
            .spawn(move || run_fetch(inner, query, generation));
        if let Err(e) = spawned {
            tracing::warn!(lens = %self.inner.name, error = %e, "could not start fetch");
            self.inner.finish();
        }
    }
}

impl<R> Inner<R> {
    fn finish(&self) {
        {
            let mut state = self.state.lock();
            state.in_flight = false;
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
        self.idle.notify_all();
    }
}

fn run_fetch<R>(inner: Arc<Inner<R>>, query: String, generation: u64)
where
    R: Send + Sync + 'static,
{
    let _in_flight = scopeguard::guard(Arc::clone(&inner), |inner| inner.finish());

    tracing::debug!(lens = %inner.name, %query, "remote search started");
    match inner.fetcher.fetch(&query) {
        Ok(mut results) => {
            results.truncate(inner.limit);
            let mut state = inner.state.lock();
            if state.generation == generation {
                tracing::debug!(lens = %inner.name, %query, results = results.len(), "remote search complete");
                state.results = Arc::new(Snapshot::new(results));
            } else {
                tracing::debug!(lens = %inner.name, %query, "query cleared during fetch, results dropped");
            }
        }
        Err(e) => {
            tracing::warn!(lens = %inner.name, %query, error = %e, "remote search failed, keeping previous results");
        }
    }
}
