//! Terminal lifecycle
//!
//! Raw mode and the alternate screen are entered once and left on exit or
//! drop. Key polling waits at most one tick so the caller can redraw the
//! analyzing gauge while no key is pressed.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the TUI runs
pub struct Tui {
    terminal: CrosstermTerminal,
    entered: bool,
    tick_rate: Duration,
    last_tick: Instant,
}

impl Tui {
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            entered: false,
            tick_rate,
            last_tick: Instant::now(),
        })
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.entered = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }

    /// Give the terminal back. Safe to call more than once.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    pub fn terminal_mut(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }

    /// Next key press, or `None` once the current tick has elapsed
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
        let key = if event::poll(timeout)? {
            key_press(event::read()?)
        } else {
            None
        };

        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }
        Ok(key)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Key presses only; Windows also reports releases and repeats
fn key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_only_presses_are_forwarded() {
        assert!(key_press(key(KeyEventKind::Press)).is_some());
        assert!(key_press(key(KeyEventKind::Release)).is_none());
        assert!(key_press(key(KeyEventKind::Repeat)).is_none());
        assert!(key_press(Event::Resize(80, 24)).is_none());
    }
}
