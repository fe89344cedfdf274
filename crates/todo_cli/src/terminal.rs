//! Terminal lifecycle and the interactive event loop.
//!
//! # Invariants
//! - Raw mode, the alternate screen and mouse capture are released on normal
//!   exit, on error and on panic.
//! - Gestures are handled one at a time; each result is drawn before the
//!   next event is read.

use anyhow::Result;
use log::info;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use todo_core::{ItemRepository, ListView};

use crate::app::App;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

type TodoTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Runs the list screen until the user quits.
pub fn run<R: ItemRepository>(view: ListView<R>) -> Result<()> {
    install_restore_hook();
    let mut terminal = setup()?;
    info!("event=ui_start module=cli status=ok");

    let result = event_loop(&mut terminal, view);
    let restored = restore(&mut terminal);

    info!(
        "event=ui_exit module=cli status={}",
        if result.is_ok() { "ok" } else { "error" }
    );
    result.and(restored)
}

fn event_loop<B: Backend, R: ItemRepository>(
    terminal: &mut Terminal<B>,
    view: ListView<R>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(view, Rect::new(0, 0, size.width, size.height));
    let mut dirty = true;

    while !app.should_quit() {
        if dirty {
            terminal.draw(|frame| app.draw(frame))?;
            dirty = false;
        }

        if event::poll(POLL_INTERVAL)? {
            dirty |= match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    app.resize(Rect::new(0, 0, width, height));
                    true
                }
                _ => false,
            };
        }
        dirty |= app.tick(Instant::now());
    }

    Ok(())
}

fn setup() -> Result<TodoTerminal> {
    enable_raw_mode()?;
    undo_on_error(enter_screen, leave_screen)
}

fn enter_screen() -> Result<TodoTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Best-effort teardown for paths where no `Terminal` exists yet.
fn leave_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Runs `step`; on failure runs `undo` before returning the error.
fn undo_on_error<T>(step: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    let result = step();
    if result.is_err() {
        undo();
    }
    result
}

fn restore(terminal: &mut TodoTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_restore_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        leave_screen();
        previous_hook(panic_info);
    }));
}
