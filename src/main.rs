//! lodge-tui - a terminal admin UI for cabin records
//!
//! Entry point: set up file logging, the terminal and the App, then run
//! the event loop. Keyboard events become Actions; mouse presses are
//! dispatched through the overlay interaction surface inside the App.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod overlay;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::load_or_default();
    let _log_guard = init_logging();
    tracing::info!(data_path = %config.data_path, "starting lodge-tui");

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(&config)?;
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the config directory; stdout belongs to the TUI.
/// Filtering comes from `LODGE_TUI_LOG` (defaults to `info`).
fn init_logging() -> Option<WorkerGuard> {
    let dir = Config::config_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "lodge-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("LODGE_TUI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        // Composition errors abort the run instead of being retried.
        let mut drawn: Result<()> = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            drawn = app.draw(frame, area);
        })?;
        drawn?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            _ => Some(Action::Tick),
        };

        if let Some(action) = action {
            app.run_action(action)?;
        }
    }

    Ok(())
}
