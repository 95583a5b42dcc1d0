//! Terminal session
//!
//! Owns raw mode and the alternate screen for the lifetime of the app and
//! narrows crossterm's event stream to the inputs the portfolio reacts to.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

/// Inputs forwarded to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    /// Mouse wheel only; clicks and motion are dropped
    Wheel(MouseEvent),
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Keep key presses, wheel turns and resizes
    pub fn from_crossterm(event: Event) -> Option<TerminalEvent> {
        match event {
            // Windows reports releases too
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TerminalEvent::Key(key)),
            Event::Mouse(mouse)
                if matches!(
                    mouse.kind,
                    MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                ) =>
            {
                Some(TerminalEvent::Wheel(mouse))
            }
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long `next_event` waits before reporting a quiet tick
    pub tick_rate: Duration,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            tick_rate: Duration::from_millis(50),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Switch to raw mode on the alternate screen
    ///
    /// Mouse capture is on so the wheel scrolls the profile page.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Runs at most once per `enter`, also on drop.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Wait up to one tick for an input the app cares about
    pub fn next_event(&self) -> Result<Option<TerminalEvent>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        Ok(TerminalEvent::from_crossterm(event::read()?))
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_release_is_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(TerminalEvent::from_crossterm(Event::Key(release)), None);

        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Key(press)),
            Some(TerminalEvent::Key(press))
        );
    }

    #[test]
    fn test_only_wheel_mouse_events_pass() {
        assert!(matches!(
            TerminalEvent::from_crossterm(mouse(MouseEventKind::ScrollDown)),
            Some(TerminalEvent::Wheel(_))
        ));
        assert_eq!(TerminalEvent::from_crossterm(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_resize_passes_through() {
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Resize(120, 40)),
            Some(TerminalEvent::Resize(120, 40))
        );
    }
}
