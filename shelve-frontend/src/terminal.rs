use std::io::{stderr, BufWriter, Stderr};

use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::error::AppError;

pub struct TerminalWrapper {
    inner: Option<Terminal<CrosstermBackend<BufWriter<Stderr>>>>,
}

impl TerminalWrapper {
    pub fn start() -> Result<Self, AppError> {
        stderr().execute(EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(BufWriter::new(stderr())))?;
        terminal.clear()?;

        Ok(Self {
            inner: Some(terminal),
        })
    }

    pub fn draw(&mut self, view: impl FnOnce(&mut Frame<'_>)) -> Result<(), AppError> {
        match &mut self.inner {
            Some(term) => {
                term.draw(view)?;
                Ok(())
            }
            None => Err(AppError::TerminalNotInitialized),
        }
    }

    pub fn shutdown(&mut self) -> Result<(), AppError> {
        if self.inner.take().is_some() {
            terminal::disable_raw_mode()?;
            stderr().execute(LeaveAlternateScreen)?;
        }

        Ok(())
    }
}
