use std::{io, panic};

use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{event::EventHandler, result::Result, stores::LookupStore, ui, ui::StatefulWidgets};

pub type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns the terminal for the lifetime of the app and the event handler feeding it.
pub struct Tui {
    terminal: CrosstermTerminal,
    pub events: EventHandler,
}

impl Tui {
    pub fn new(terminal: CrosstermTerminal, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    /// Switches to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen)?;

        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            // best effort; the terminal may already be gone
            let _ = Self::reset();
            panic_hook(info);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn draw(&mut self, store: &LookupStore, widgets: &mut StatefulWidgets) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, store, widgets))?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }
}
