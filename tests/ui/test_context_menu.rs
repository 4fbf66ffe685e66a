//! Render tests for the context menu

use crossterm::event::KeyCode;

use super::test_browsing::draw;
use crate::common::{FakeLens, app_with, ctrl, press};

#[test]
fn test_menu_replaces_list() {
    let (apps, _) = FakeLens::new("app", 2, 2);
    let mut app = app_with(vec![Box::new(apps)], 10);
    app.on_key_event(press(KeyCode::Down));
    app.on_key_event(ctrl('o'));

    let screen = draw(&app, 60, 20);
    let text = screen.join("\n");

    // Menu box is titled with the entry
    assert!(text.contains(" app-1 "));
    assert!(text.contains("> action-0"));
    assert!(text.contains("  action-1"));
    assert!(!text.contains("* app-0"));
    assert!(text.contains("about app-1"));
    assert!(screen.last().is_some_and(|row| row.contains("[Esc] Back")));
}

#[test]
fn test_menu_cursor_moves() {
    let (apps, _) = FakeLens::new("app", 1, 3);
    let mut app = app_with(vec![Box::new(apps)], 10);
    app.on_key_event(ctrl('o'));
    app.on_key_event(press(KeyCode::Down));

    let text = draw(&app, 60, 20).join("\n");
    assert!(text.contains("> action-1"));
    assert!(text.contains("  action-0"));
}
