//! Interactive terminal loop.
//!
//! Sets up raw mode, the alternate screen and (optionally) mouse capture,
//! feeds crossterm events to the [`App`] and redraws when the view changes.
//! The terminal is restored on every exit path.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use droplist::key::from_crossterm_key;
use droplist::pointer::from_crossterm_mouse;
use tracing::{debug, info};

use crate::app::{App, Msg};
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Capture mouse events.
    pub mouse: bool,
}

/// Runs `app` on stdout until it quits. Returns the final app state.
///
/// # Errors
///
/// Returns [`Error`] if the terminal cannot be set up, polled or drawn to.
pub fn run(app: App, options: Options) -> Result<App> {
    run_with_writer(app, options, io::stdout())
}

/// Runs `app` with output going to `writer`.
///
/// # Errors
///
/// As [`run`].
pub fn run_with_writer<W: Write>(app: App, options: Options, mut writer: W) -> Result<App> {
    enable_raw_mode().map_err(|source| Error::RawModeFailure {
        action: "enable",
        source,
    })?;
    if let Err(err) = setup(&mut writer, options) {
        let _ = disable_raw_mode();
        return Err(err);
    }
    info!(mouse = options.mouse, "terminal ready");

    let result = event_loop(app, &mut writer);

    if options.mouse {
        let _ = execute!(writer, DisableMouseCapture);
    }
    let _ = execute!(writer, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    info!("terminal restored");

    result
}

fn setup<W: Write>(writer: &mut W, options: Options) -> Result<()> {
    execute!(writer, EnterAlternateScreen, Hide)?;
    if options.mouse {
        execute!(writer, EnableMouseCapture)?;
    }
    Ok(())
}

fn event_loop<W: Write>(mut app: App, writer: &mut W) -> Result<App> {
    let mut last_view = String::new();
    render(&app, writer, &mut last_view)?;

    while !app.should_quit() {
        let msg = if event::poll(POLL_INTERVAL).map_err(Error::EventPoll)? {
            match event::read().map_err(Error::EventPoll)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    Msg::Key(from_crossterm_key(key.code, key.modifiers))
                }
                Event::Mouse(mouse) => Msg::Pointer(from_crossterm_mouse(mouse)),
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    last_view.clear();
                    Msg::Tick
                }
                _ => Msg::Tick,
            }
        } else {
            Msg::Tick
        };

        app.update(msg, Instant::now());
        render(&app, writer, &mut last_view)?;
    }
    Ok(app)
}

fn render<W: Write>(app: &App, writer: &mut W, last_view: &mut String) -> Result<()> {
    let view = app.view();
    if view == *last_view {
        return Ok(());
    }

    // Raw mode: position every line explicitly instead of relying on '\n'.
    queue!(writer, MoveTo(0, 0), Clear(ClearType::All)).map_err(Error::Render)?;
    let (_, rows) = terminal::size().unwrap_or((0, u16::MAX));
    for (row, line) in view.lines().enumerate() {
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        if row >= rows {
            break;
        }
        queue!(writer, MoveTo(0, row), Print(line)).map_err(Error::Render)?;
    }
    writer.flush().map_err(Error::Render)?;

    *last_view = view;
    Ok(())
}
