//! Terminal shell: menus and the lesson screen.

pub mod app;
pub mod input;
pub mod render;

pub use app::{App, LessonScreen, Screen};

use crate::db::Repository;
use crate::state::AppState;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;

/// Take over the terminal and run until the user quits.
pub fn run_tui<R: Repository>(state: AppState<R>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

/// One event is handled and drawn before the next is read.
fn run_app<B: Backend, R: Repository>(terminal: &mut Terminal<B>, app: &mut App<R>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
