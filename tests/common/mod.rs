//! Common test utilities for integration tests.
//!
//! Provides a scripted in-memory lens that records every call made into
//! it, so tests can assert on what the state machine routed where.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parking_lot::Mutex;

use lantern::app::App;
use lantern::lens::{Lens, LensError, LensRegistry};
use lantern::model::{ActionKind, ContextAction, Entry};

/// Calls observed by a [`FakeLens`], shared with the test
pub type CallLog = Arc<Mutex<Vec<String>>>;

fn numbered(name: &str, count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| {
            let id = format!("{}-{}", name, i);
            Entry::new(&id, &id, "*", format!("about {}", id))
        })
        .collect()
}

/// Test side of a [`FakeLens`]: swaps its entries like a background pass
#[derive(Clone)]
pub struct FakeData {
    name: String,
    entries: Arc<Mutex<Vec<Entry>>>,
    revision: Arc<AtomicU64>,
}

impl FakeData {
    /// Replace the listing with `count` entries and bump the revision
    pub fn publish(&self, count: usize) {
        *self.entries.lock() = numbered(&self.name, count);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory lens with a scripted entry list
pub struct FakeLens {
    name: String,
    entries: Arc<Mutex<Vec<Entry>>>,
    revision: Arc<AtomicU64>,
    actions_per_entry: usize,
    calls: CallLog,
}

impl FakeLens {
    /// `count` entries titled `<name>-0`, `<name>-1`, ...
    pub fn new(name: &str, count: usize, actions_per_entry: usize) -> (Self, CallLog) {
        let calls = CallLog::default();
        (
            Self {
                name: name.to_string(),
                entries: Arc::new(Mutex::new(numbered(name, count))),
                revision: Arc::default(),
                actions_per_entry,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    pub fn data(&self) -> FakeData {
        FakeData {
            name: self.name.clone(),
            entries: Arc::clone(&self.entries),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl Lens for FakeLens {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        self.calls.lock().push(format!("search:{}", query));
        let query = query.trim().to_lowercase();
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        self.calls.lock().push(format!("enter:{}", entry.id));
        Ok(())
    }

    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction> {
        (0..self.actions_per_entry)
            .map(|i| {
                ContextAction::new(
                    format!("action-{}", i),
                    entry.clone(),
                    ActionKind::Command(format!("cmd-{}", i)),
                )
            })
            .collect()
    }

    fn run_action(&self, action: &ContextAction) -> Result<(), LensError> {
        self.calls
            .lock()
            .push(format!("run:{}:{}", action.label, action.target.id));
        Ok(())
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

/// Lens whose search always fails
pub struct BrokenLens;

impl Lens for BrokenLens {
    fn name(&self) -> &str {
        "Broken"
    }

    fn search(&self, _query: &str) -> Result<Vec<Entry>, LensError> {
        Err(LensError::Unsupported("broken".to_string()))
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        Err(LensError::UnknownEntry(entry.id.clone()))
    }

    fn context_actions(&self, _entry: &Entry) -> Vec<ContextAction> {
        Vec::new()
    }
}

/// App over the given lenses with a fixed list height
pub fn app_with(lenses: Vec<Box<dyn Lens>>, visible_rows: u16) -> App {
    App::with_visible_rows(LensRegistry::new(lenses), visible_rows)
}

pub fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Type `text` one key at a time
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.on_key_event(press(KeyCode::Char(c)));
    }
}
