//! Rendering logic for the application

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use super::state::{App, Mode};
use crate::keys;
use crate::ui::components::{bordered_block, highlighted_block, no_results_state};
use crate::ui::theme;
use crate::ui::widgets::render_status_bar;

const TABS_HEIGHT: u16 = 3;
const DESCRIPTION_HEIGHT: u16 = 5;
const SEARCH_HEIGHT: u16 = 3;
const HINTS_HEIGHT: u16 = 1;
const MIN_LIST_HEIGHT: u16 = 3;
const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";

impl App {
    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        let [tabs, list, description, search, hints] = Layout::vertical([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(MIN_LIST_HEIGHT),
            Constraint::Length(DESCRIPTION_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Length(HINTS_HEIGHT),
        ])
        .areas(frame.area());

        self.render_tabs(frame, tabs);
        self.render_list(frame, list);
        self.render_description(frame, description);
        self.render_search(frame, search);
        render_status_bar(frame, hints, keys::current_hints(&self.mode));
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let active = self.registry.active_index();
        let mut spans = Vec::new();
        for (i, name) in self.registry.names().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            if i == active {
                spans.push(Span::styled(
                    format!("[{}]", name),
                    Style::default().fg(theme::tabs::ACTIVE).bold(),
                ));
            } else {
                spans.push(Span::styled(
                    name.to_string(),
                    Style::default().fg(theme::tabs::INACTIVE),
                ));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).block(bordered_block(" Lenses ")),
            area,
        );
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let block = match &self.mode {
            Mode::Browsing => bordered_block(" Results "),
            Mode::ContextMenu(menu) => highlighted_block(
                format!(" {} ", menu.entry.title),
                theme::list::CONTEXT_BORDER,
            ),
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Save for input-time scroll adjustment
        self.visible_rows.set(inner.height);
        let visible = inner.height as usize;

        let lines: Vec<Line> = match &self.mode {
            Mode::Browsing => {
                if self.entries.is_empty() {
                    frame.render_widget(no_results_state(&self.query()), inner);
                    return;
                }
                self.entries
                    .iter()
                    .enumerate()
                    .skip(self.scroll)
                    .take(visible)
                    .map(|(i, entry)| {
                        row_line(i == self.selected, Some(&entry.icon), &entry.title)
                    })
                    .collect()
            }
            Mode::ContextMenu(menu) => menu
                .actions
                .iter()
                .enumerate()
                .skip(menu.scroll)
                .take(visible)
                .map(|(i, action)| row_line(i == menu.selected, None, &action.label))
                .collect(),
        };

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_description(&self, frame: &mut Frame, area: Rect) {
        let text = match &self.mode {
            Mode::Browsing => self
                .selected_entry()
                .map(|e| e.description.clone())
                .unwrap_or_default(),
            Mode::ContextMenu(menu) => menu.entry.description.clone(),
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(theme::panels::DESCRIPTION))
                .wrap(Wrap { trim: true })
                .block(bordered_block(" Description ")),
            area,
        );
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let block = bordered_block(" Search ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(&self.query, inner);
    }
}

fn row_line<'a>(selected: bool, icon: Option<&'a str>, title: &'a str) -> Line<'a> {
    let mut spans = Vec::new();
    if selected {
        spans.push(Span::styled(
            CURSOR,
            Style::default().fg(theme::list::SELECTED_FG).bold(),
        ));
    } else {
        spans.push(Span::raw(NO_CURSOR));
    }
    if let Some(icon) = icon.filter(|i| !i.is_empty()) {
        spans.push(Span::styled(icon, Style::default().fg(theme::list::ICON)));
        spans.push(Span::raw(" "));
    }
    let title_style = if selected {
        Style::default()
            .fg(theme::list::SELECTED_FG)
            .bg(theme::list::SELECTED_BG)
    } else {
        Style::default()
    };
    spans.push(Span::styled(title, title_style));
    Line::from(spans)
}
