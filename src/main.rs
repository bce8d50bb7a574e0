mod app;
mod config;
mod content;
mod error;
mod glow;
mod helpers;
mod logging;
mod page;
mod rain;
mod reveal;
mod spy;
mod types;

use crate::{
    app::{App, Flow},
    error::Error,
    helpers::{parse_args, print_usage_and_exit},
};

use ratatui::{
    crossterm::{
        cursor::Show,
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    prelude::*,
};
use std::{
    env, io,
    time::{Duration, Instant},
};
use tracing::info;

const POLLING_RATE_MS: u64 = 16;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> error::Result<Self> {
        enable_raw_mode()?;

        // from here on Drop undoes whatever part succeeded
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(Error::Help) => print_usage_and_exit(0),
        Err(e) => {
            eprintln!("{e}");

            print_usage_and_exit(1)
        }
    };

    logging::init(config.log_path.as_deref())?;
    info!(?config, "starting");

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let mut app = App::new(&config, (size.width, size.height), Instant::now());

    loop {
        app.update(Instant::now());
        terminal.draw(|frame| app.draw_ui(frame))?;

        if event::poll(Duration::from_millis(POLLING_RATE_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Flow::Quit {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }
    }

    info!("exiting");

    Ok(())
}
