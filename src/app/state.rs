//! Application state and lens routing

use std::cell::Cell;
use std::collections::HashMap;

use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::lens::{Lens, LensError, LensRegistry};
use crate::model::{ContextAction, Entry};
use crate::ui::{navigation, theme};

/// Rows assumed for the result list before the first frame is drawn
pub(crate) const DEFAULT_VISIBLE_ROWS: u16 = 10;

/// Open context menu for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    /// Lens that produced the actions
    pub lens_index: usize,
    pub entry: Entry,
    pub actions: Vec<ContextAction>,
    pub selected: usize,
    pub scroll: usize,
}

/// A lens's empty-query entries and the revision they were searched at
#[derive(Debug, Clone)]
pub(crate) struct Listing {
    pub revision: u64,
    pub entries: Vec<Entry>,
}

/// Interaction mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    ContextMenu(ContextMenu),
}

/// The main application state
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    pub registry: LensRegistry,
    pub(crate) query: TextArea<'static>,
    pub mode: Mode,
    /// Entries of the active lens for the current query
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub scroll: usize,
    /// Empty-query listings by lens index; dropped once a query is typed
    pub(crate) cached_entries: HashMap<usize, Listing>,
    /// [`Lens::revision`] of the active lens when `entries` was searched
    pub(crate) searched_revision: u64,
    /// Result list height from the last frame (Cell: written during render)
    pub(crate) visible_rows: Cell<u16>,
}

impl App {
    /// Construct the app over `registry` and run the first search
    pub fn new(registry: LensRegistry) -> Self {
        Self::with_visible_rows(registry, DEFAULT_VISIBLE_ROWS)
    }

    /// Same as [`App::new`] with a fixed list height (headless use)
    pub fn with_visible_rows(registry: LensRegistry, rows: u16) -> Self {
        let mut app = Self {
            running: true,
            registry,
            query: new_query_input(),
            mode: Mode::Browsing,
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
            cached_entries: HashMap::new(),
            searched_revision: 0,
            visible_rows: Cell::new(rows),
        };
        app.refresh_entries();
        app
    }

    /// Current query text
    pub fn query(&self) -> String {
        self.query.lines().concat()
    }

    /// Replace the query text and search again
    pub fn set_query(&mut self, text: &str) {
        self.query = new_query_input();
        self.query.insert_str(text);
        self.on_query_changed();
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Open context menu, if any
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        match &self.mode {
            Mode::ContextMenu(menu) => Some(menu),
            Mode::Browsing => None,
        }
    }

    pub(crate) fn visible_count(&self) -> usize {
        self.visible_rows.get() as usize
    }

    /// Idle tick: pick up background results for the current query
    ///
    /// Searches again only when the active lens reports new background data.
    pub fn on_tick(&mut self) {
        if !matches!(self.mode, Mode::Browsing) {
            return;
        }
        let changed = self
            .registry
            .active()
            .is_some_and(|lens| lens.revision() != self.searched_revision);
        if changed {
            self.refresh_entries();
        }
    }

    pub(crate) fn quit(&mut self) {
        self.running = false;
    }

    // =========================================================================
    // Searching
    // =========================================================================

    /// Re-run the active lens search, keeping the cursor where it can
    pub(crate) fn refresh_entries(&mut self) {
        let query = self.query();
        let index = self.registry.active_index();
        // Read before searching so data landing mid-search is seen next tick
        self.searched_revision = self.registry.active().map_or(0, |lens| lens.revision());
        self.entries = self.search_active(&query);

        if query.trim().is_empty() {
            self.cached_entries.insert(
                index,
                Listing {
                    revision: self.searched_revision,
                    entries: self.entries.clone(),
                },
            );
        } else {
            self.cached_entries.clear();
        }

        self.selected = navigation::clamp_cursor(self.selected, self.entries.len());
        self.scroll = self.scroll.min(self.selected);
        self.scroll = navigation::follow_cursor(self.selected, self.scroll, self.visible_count());
    }

    fn search_active(&self, query: &str) -> Vec<Entry> {
        let Some(lens) = self.registry.active() else {
            return Vec::new();
        };
        match lens.search(query) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(lens = lens.name(), error = %e, "search failed");
                Vec::new()
            }
        }
    }

    pub(crate) fn on_query_changed(&mut self) {
        self.selected = 0;
        self.scroll = 0;
        self.refresh_entries();
    }

    // =========================================================================
    // Lens switching
    // =========================================================================

    pub(crate) fn next_lens(&mut self) {
        self.registry.select_next();
        self.on_lens_changed();
    }

    pub(crate) fn prev_lens(&mut self) {
        self.registry.select_prev();
        self.on_lens_changed();
    }

    fn on_lens_changed(&mut self) {
        self.mode = Mode::Browsing;
        self.selected = 0;
        self.scroll = 0;

        let index = self.registry.active_index();
        let cached = if self.query().trim().is_empty() {
            self.cached_entries.get(&index).cloned()
        } else {
            None
        };
        match cached {
            Some(listing) => {
                self.entries = listing.entries;
                self.searched_revision = listing.revision;
            }
            None => self.refresh_entries(),
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    pub(crate) fn move_up(&mut self) {
        let visible = self.visible_count();
        match &mut self.mode {
            Mode::Browsing => {
                self.selected = navigation::cursor_up(self.selected);
                self.scroll = navigation::follow_cursor(self.selected, self.scroll, visible);
            }
            Mode::ContextMenu(menu) => {
                menu.selected = navigation::cursor_up(menu.selected);
                menu.scroll = navigation::follow_cursor(menu.selected, menu.scroll, visible);
            }
        }
    }

    pub(crate) fn move_down(&mut self) {
        let visible = self.visible_count();
        match &mut self.mode {
            Mode::Browsing => {
                self.selected = navigation::cursor_down(self.selected, self.entries.len());
                self.scroll = navigation::follow_cursor(self.selected, self.scroll, visible);
            }
            Mode::ContextMenu(menu) => {
                menu.selected = navigation::cursor_down(menu.selected, menu.actions.len());
                menu.scroll = navigation::follow_cursor(menu.selected, menu.scroll, visible);
            }
        }
    }

    // =========================================================================
    // Context menu and commit
    // =========================================================================

    /// Open the context menu for the selected entry
    ///
    /// No entry, or an entry without actions, leaves the mode unchanged.
    pub(crate) fn open_context_menu(&mut self) {
        if !matches!(self.mode, Mode::Browsing) {
            return;
        }
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        let Some(lens) = self.registry.active() else {
            return;
        };
        let actions = lens.context_actions(&entry);
        if actions.is_empty() {
            tracing::debug!(lens = lens.name(), entry = %entry.id, "no context actions");
            return;
        }
        self.mode = Mode::ContextMenu(ContextMenu {
            lens_index: self.registry.active_index(),
            entry,
            actions,
            selected: 0,
            scroll: 0,
        });
    }

    pub(crate) fn close_context_menu(&mut self) {
        self.mode = Mode::Browsing;
    }

    /// Enter on the selected entry, or run the selected context action
    pub(crate) fn commit(&mut self) {
        match std::mem::take(&mut self.mode) {
            Mode::Browsing => {
                let (Some(lens), Some(entry)) = (self.registry.active(), self.selected_entry())
                else {
                    return;
                };
                log_outcome(lens, &entry.id, lens.enter(entry));
            }
            Mode::ContextMenu(menu) => {
                if let (Some(lens), Some(action)) = (
                    self.registry.get(menu.lens_index),
                    menu.actions.get(menu.selected),
                ) {
                    log_outcome(lens, &action.label, lens.run_action(action));
                }
                self.refresh_entries();
            }
        }
    }
}

fn log_outcome(lens: &dyn Lens, what: &str, outcome: Result<(), LensError>) {
    match outcome {
        Ok(()) => tracing::info!(lens = lens.name(), what, "committed"),
        Err(e) => tracing::warn!(lens = lens.name(), what, error = %e, "action failed"),
    }
}

fn new_query_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Search...");
    input.set_placeholder_style(Style::default().fg(theme::panels::PLACEHOLDER));
    input.set_cursor_line_style(Style::default());
    input
}
