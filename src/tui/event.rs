use crossterm::event::{self, Event, KeyEvent};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Discrete user actions consumed by the navigation state machine.
///
/// The render surface owns no behavior: keys are translated here and every
/// state change happens in [`TuiApp`](crate::tui::app::TuiApp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Select,
    Refresh,
    OpenInBrowser,
    /// 1-based list row; digits `1`-`9` map to rows 1-9, `0` to row 10.
    JumpToRow(usize),
    None,
}
