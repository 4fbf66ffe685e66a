//! UI render tests using ratatui's TestBackend
//!
//! Each submodule draws the full launcher screen into an in-memory
//! buffer and inspects the resulting text.
//! Reference: https://ratatui.rs/recipes/testing/snapshots/

mod common;

#[path = "ui/test_browsing.rs"]
mod test_browsing;

#[path = "ui/test_context_menu.rs"]
mod test_context_menu;
