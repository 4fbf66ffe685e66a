//! Keybinding definitions for Lantern
//!
//! All keybindings are defined here. Anything not bound below is handed
//! to the query input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::app::Mode;

// =============================================================================
// Global keys
// =============================================================================

/// Cancel context menu, or quit while browsing
pub const ESC: KeyCode = KeyCode::Esc;

/// Next lens
pub const NEXT_LENS: KeyCode = KeyCode::Tab;

/// Previous lens (Shift+Tab)
pub const PREV_LENS: KeyCode = KeyCode::BackTab;

/// Commit (Enter on entry, or run the selected action)
pub const SUBMIT: KeyCode = KeyCode::Enter;

/// Check if key is Ctrl+C
/// Note: Accept both 'c' and 'C' for terminal compatibility
pub fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

// =============================================================================
// Navigation keys
// =============================================================================

/// Move cursor up (arrow key)
pub const MOVE_UP_ARROW: KeyCode = KeyCode::Up;

/// Move cursor down (arrow key)
pub const MOVE_DOWN_ARROW: KeyCode = KeyCode::Down;

/// Check if key is move up (↑ or Ctrl+P)
pub fn is_move_up(key: &KeyEvent) -> bool {
    key.code == MOVE_UP_ARROW || is_ctrl_char(key, 'p')
}

/// Check if key is move down (↓ or Ctrl+N)
pub fn is_move_down(key: &KeyEvent) -> bool {
    key.code == MOVE_DOWN_ARROW || is_ctrl_char(key, 'n')
}

// =============================================================================
// Context menu
// =============================================================================

/// Check if key opens the context menu (Alt+Enter, Shift+Enter or Ctrl+O)
///
/// Shift+Enter only arrives on terminals with keyboard enhancement, so
/// Ctrl+O is the portable binding.
pub fn is_context_key(key: &KeyEvent) -> bool {
    (key.code == SUBMIT && key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT))
        || is_ctrl_char(key, 'o')
}

fn is_ctrl_char(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

// =============================================================================
// Status bar hints
// =============================================================================

/// Key hint for status bar display (colored badges)
#[derive(Clone, Copy, Debug)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Color,
}

pub const HINT_LENS: KeyHint = KeyHint {
    key: "Tab",
    label: "Lens",
    color: Color::Cyan,
};

pub const HINT_MOVE: KeyHint = KeyHint {
    key: "↑↓",
    label: "Move",
    color: Color::Blue,
};

pub const HINT_ENTER: KeyHint = KeyHint {
    key: "Enter",
    label: "Open",
    color: Color::Green,
};

pub const HINT_CONTEXT: KeyHint = KeyHint {
    key: "^O",
    label: "Actions",
    color: Color::Yellow,
};

pub const HINT_RUN: KeyHint = KeyHint {
    key: "Enter",
    label: "Run",
    color: Color::Green,
};

pub const HINT_CANCEL: KeyHint = KeyHint {
    key: "Esc",
    label: "Back",
    color: Color::Magenta,
};

pub const HINT_QUIT: KeyHint = KeyHint {
    key: "^C",
    label: "Quit",
    color: Color::Red,
};

pub const BROWSING_HINTS: &[KeyHint] = &[HINT_LENS, HINT_MOVE, HINT_ENTER, HINT_CONTEXT, HINT_QUIT];

pub const CONTEXT_MENU_HINTS: &[KeyHint] = &[HINT_MOVE, HINT_RUN, HINT_CANCEL];

/// Hints for the current mode
pub fn current_hints(mode: &Mode) -> &'static [KeyHint] {
    match mode {
        Mode::Browsing => BROWSING_HINTS,
        Mode::ContextMenu(_) => CONTEXT_MENU_HINTS,
    }
}
