//! Input handling for the application

use crossterm::event::{KeyEvent, KeyEventKind};

use super::state::{App, Mode};
use crate::keys;

impl App {
    /// Handle key events
    pub fn on_key_event(&mut self, key: KeyEvent) {
        // Key releases arrive on keyboard-enhanced terminals
        if key.kind == KeyEventKind::Release {
            return;
        }

        if keys::is_quit_key(&key) {
            self.quit();
            return;
        }

        if self.handle_global_key(key) {
            return;
        }

        match self.mode {
            Mode::Browsing => self.handle_browsing_key(key),
            Mode::ContextMenu(_) => {}
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        if keys::is_context_key(&key) {
            self.open_context_menu();
            return true;
        }
        if keys::is_move_up(&key) {
            self.move_up();
            return true;
        }
        if keys::is_move_down(&key) {
            self.move_down();
            return true;
        }

        match key.code {
            keys::ESC => {
                self.handle_back();
                true
            }
            keys::SUBMIT => {
                self.commit();
                true
            }
            keys::NEXT_LENS => {
                self.next_lens();
                true
            }
            keys::PREV_LENS => {
                self.prev_lens();
                true
            }
            _ => false,
        }
    }

    /// Esc leaves the context menu; while browsing it does nothing
    fn handle_back(&mut self) {
        if let Mode::ContextMenu(_) = self.mode {
            self.close_context_menu();
        }
    }

    /// Everything else edits the query
    fn handle_browsing_key(&mut self, key: KeyEvent) {
        let before = self.query();
        self.query.input(key);
        if self.query.lines().len() > 1 {
            // Single-line input: fold a stray newline (Ctrl+M) back in
            let text = self.query();
            self.set_query(&text);
            return;
        }
        if self.query() != before {
            self.on_query_changed();
        }
    }
}
