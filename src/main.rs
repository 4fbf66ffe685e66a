//! Lantern - terminal launcher
//!
//! Binary entry point for the TUI application.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use lantern::app::App;
use lantern::{lenses, logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::log_path() {
        logging::init(&path);
    }

    // Lenses start their background refreshes before the first frame
    let registry = lenses::default_registry();
    tracing::info!(lenses = ?registry.names(), "starting");

    let terminal = ratatui::init();
    let result = run(terminal, App::new(registry));
    ratatui::restore();
    result
}

/// Run the application's main loop.
fn run(mut terminal: DefaultTerminal, mut app: App) -> color_eyre::Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        handle_events(&mut app)?;
    }

    Ok(())
}

/// Handle crossterm events.
///
/// Uses poll with 200ms timeout so results from background refreshes and
/// remote searches show up without a keystroke.
fn handle_events(app: &mut App) -> color_eyre::Result<()> {
    if event::poll(Duration::from_millis(200))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.on_key_event(key);
            }
            _ => {}
        }
    } else {
        app.on_tick();
    }
    Ok(())
}
