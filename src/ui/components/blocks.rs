//! Block components for UI rendering

use ratatui::{
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders},
};

/// Rounded box with a title
pub fn bordered_block<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
}

/// Rounded box with a colored border (context menu)
pub fn highlighted_block<'a>(title: impl Into<Line<'a>>, color: Color) -> Block<'a> {
    bordered_block(title).border_style(Style::default().fg(color))
}
