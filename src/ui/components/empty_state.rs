//! Empty state components
//!
//! Display messages when a lens has nothing to show.

use ratatui::{style::Stylize, text::Line, widgets::Paragraph};

/// Create a centered empty state display
///
/// # Arguments
/// * `title` - Main message to display
/// * `hint` - Optional hint text (displayed in gray)
pub fn empty_state(title: &str, hint: Option<&str>) -> Paragraph<'static> {
    let mut lines = vec![Line::from(""), Line::from(title.to_string()).centered()];

    if let Some(hint_text) = hint {
        lines.push(Line::from(hint_text.to_string()).dark_gray().centered());
    }

    Paragraph::new(lines)
}

/// Empty list message, worded by whether a query is typed
pub fn no_results_state(query: &str) -> Paragraph<'static> {
    if query.trim().is_empty() {
        empty_state("Nothing here yet", Some("Type to search"))
    } else {
        empty_state("No matches", None)
    }
}
