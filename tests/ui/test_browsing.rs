//! Render tests for the browsing screen

use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::common::{FakeLens, app_with, press};
use lantern::app::App;

/// Draw `app` and return the screen as one string per row
pub fn draw(app: &App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    rows(terminal.backend().buffer())
}

fn rows(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_layout_shows_tabs_list_description_search() {
    let (apps, _) = FakeLens::new("app", 3, 0);
    let (files, _) = FakeLens::new("file", 1, 0);
    let app = app_with(vec![Box::new(apps), Box::new(files)], 10);

    let screen = draw(&app, 60, 20);

    assert!(screen_contains(&screen, "[app] | file"));
    assert!(screen_contains(&screen, "Results"));
    assert!(screen_contains(&screen, "> * app-0"));
    assert!(screen_contains(&screen, "  * app-1"));
    assert!(screen_contains(&screen, "about app-0"));
    assert!(screen_contains(&screen, "Search"));
    // Hint bar on the last row
    assert!(screen.last().is_some_and(|row| row.contains("[Enter] Open")));
}

#[test]
fn test_cursor_and_description_follow_selection() {
    let (apps, _) = FakeLens::new("app", 3, 0);
    let mut app = app_with(vec![Box::new(apps)], 10);
    app.on_key_event(press(KeyCode::Down));

    let screen = draw(&app, 60, 20);
    assert!(screen_contains(&screen, "> * app-1"));
    assert!(screen_contains(&screen, "about app-1"));
}

#[test]
fn test_render_records_list_height_for_scrolling() {
    let (files, _) = FakeLens::new("file", 30, 0);
    let mut app = app_with(vec![Box::new(files)], 10);

    // 20 rows: 3 tabs + 5 description + 3 search + 1 hints leaves an
    // 8-row list box with 6 inner rows
    draw(&app, 60, 20);
    for _ in 0..6 {
        app.on_key_event(press(KeyCode::Down));
    }
    assert_eq!(app.selected, 6);
    assert_eq!(app.scroll, 1);

    let screen = draw(&app, 60, 20);
    assert!(!screen_contains(&screen, "file-0 "));
    assert!(screen_contains(&screen, "> * file-6"));
}

#[test]
fn test_query_is_rendered() {
    let (apps, _) = FakeLens::new("app", 3, 0);
    let mut app = app_with(vec![Box::new(apps)], 10);
    app.set_query("app-2");

    let screen = draw(&app, 60, 20);
    assert!(screen_contains(&screen, "app-2"));
    assert!(!screen_contains(&screen, "app-0"));
}

#[test]
fn test_empty_list_shows_message() {
    let (apps, _) = FakeLens::new("app", 3, 0);
    let mut app = app_with(vec![Box::new(apps)], 10);
    app.set_query("zzz");

    let screen = draw(&app, 60, 20);
    assert!(screen_contains(&screen, "No matches"));
}
