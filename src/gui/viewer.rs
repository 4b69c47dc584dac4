use crate::{gui::chart::ChartData, gui::error::GuiError, trend::Trend};

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{debug, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io::{self, stdout},
    time::Duration,
};

/// Show the chart full screen until the user presses `q` or `Esc`.
pub fn show_chart(trend: &Trend, dates: &[NaiveDate]) -> Result<(), GuiError> {
    // setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            stdout().execute(EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
            terminal.clear()?;
            Ok(terminal)
        },
        restore_terminal,
    )?;

    let res = run_viewer(&mut terminal, trend, dates);

    // restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Run `setup`, calling `restore` if it fails so a half-initialised terminal
/// is put back before the error is returned.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, GuiError> {
    setup().map_err(|e| {
        if let Err(restore_err) = restore() {
            warn!("Could not restore the terminal: {}", restore_err);
        }
        GuiError::from(e)
    })
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn run_viewer<B: Backend>(
    terminal: &mut Terminal<B>,
    trend: &Trend,
    dates: &[NaiveDate],
) -> Result<(), GuiError> {
    loop {
        terminal.draw(|f| ui(f, trend, dates))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                        return Ok(());
                    }
                }
                Event::Resize(w, h) => debug!("Resized to {}x{}", w, h),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, trend: &Trend, dates: &[NaiveDate]) {
    let area = f.size();
    let data = ChartData::new(trend, dates, area);
    f.render_widget(data.chart(), area);
}
