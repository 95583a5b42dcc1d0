//! portfolio-tui - A personal portfolio in the terminal
//!
//! Two professional profiles behind a profile selector, with animated
//! section entrances and a light/dark/system theme preference.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::components::Palette;
use crate::config::Config;
use crate::tui::{TerminalEvent, Tui};
use anyhow::Result;
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let (config, config_warning) = match Config::config_path() {
        Some(path) => Config::load_or_create_at(&path),
        None => (Config::default(), None),
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("Logging disabled: {:?}", e);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting portfolio-tui");
    if let Some(warning) = config_warning {
        eprintln!("{}", warning);
        warn!(%warning, "config");
    }

    // Build the app first so content errors print to a normal terminal
    let mut app = App::new(config.clone())?;
    if let Some(warning) = &app.status_message {
        warn!(%warning, "content fallback");
    }
    app.init()?;

    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;
    let result = run_app(&mut tui, &mut app);
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "application error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("portfolio-tui exited");
    Ok(())
}

/// Feed an action and every follow-up it produces through the app
fn dispatch(app: &mut App, action: Action) -> Result<()> {
    let mut next = Some(action);
    while let Some(action) = next {
        next = app.update(action)?;
    }
    Ok(())
}

fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    let tick_rate = tui.tick_rate;
    let mut last_tick = Instant::now();

    while !app.should_quit {
        let palette = Palette::from_root(app.root());
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area, &palette) {
                error!(error = ?e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            Some(TerminalEvent::Key(key)) => app.handle_key_event(key)?,
            Some(TerminalEvent::Wheel(mouse)) => app.handle_mouse_event(mouse)?,
            Some(TerminalEvent::Resize(w, h)) => Some(Action::Resize(w, h)),
            None => None,
        };
        if let Some(action) = action {
            dispatch(app, action)?;
        }

        // Input bursts must not starve animations or system theme polling
        if last_tick.elapsed() >= tick_rate {
            dispatch(app, Action::Tick)?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
