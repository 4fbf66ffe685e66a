//! Key hint bar widget

use ratatui::{Frame, prelude::*, text::Line, widgets::Paragraph};

use crate::keys::KeyHint;

/// Build a hint line from key hints
pub fn build_status_bar(hints: &[KeyHint]) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" [{}] {} ", hint.key, hint.label),
            Style::default().fg(Color::Black).bg(hint.color),
        ));
    }

    Line::from(spans)
}

/// Render hints into a one-line area
pub fn render_status_bar(frame: &mut Frame, area: Rect, hints: &[KeyHint]) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(build_status_bar(hints)), area);
}
