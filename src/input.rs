//! Input contract between the game loop and a front end
//!
//! Front ends translate their native key events into [`InputEvent`]s. The
//! loop drains everything that arrived since the previous frame, in order.

use crate::error::Result;
use crate::sim::Side;

/// The four things a player can ask a paddle to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Command {
    /// Fixed key bindings: `q`/`a` for the left paddle, `p`/`l` for the right
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'q' => Some(Command::LeftUp),
            'a' => Some(Command::LeftDown),
            'p' => Some(Command::RightUp),
            'l' => Some(Command::RightDown),
            _ => None,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Command::LeftUp | Command::LeftDown => Side::Left,
            Command::RightUp | Command::RightDown => Side::Right,
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Command::LeftUp | Command::RightUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The window/terminal/page wants to go away
    Close,
    /// A key bound to a paddle command went down (or auto-repeated)
    KeyPressed(Command),
}

/// A source of input events
pub trait InputSource {
    /// Everything that happened since the previous poll, oldest first
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Synthesized key repeat for front ends that report key releases
///
/// A held key fires once on press, again after `delay_ms`, then every
/// `interval_ms` until released. Timestamps are milliseconds on any
/// monotonic clock the caller likes.
#[derive(Debug, Clone)]
pub struct KeyRepeat {
    delay_ms: f64,
    interval_ms: f64,
    /// Held commands and when each fires next
    held: Vec<(Command, f64)>,
}

impl KeyRepeat {
    pub fn new(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_ms: f64::from(delay_ms),
            interval_ms: f64::from(interval_ms.max(1)),
            held: Vec::new(),
        }
    }

    /// Key went down. Returns false if it was already held (the caller
    /// should not emit a second press).
    pub fn press(&mut self, command: Command, now_ms: f64) -> bool {
        if self.held.iter().any(|(c, _)| *c == command) {
            return false;
        }
        self.held.push((command, now_ms + self.delay_ms));
        true
    }

    pub fn release(&mut self, command: Command) {
        self.held.retain(|(c, _)| *c != command);
    }

    /// Forget every held key (focus lost)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, command: Command) -> bool {
        self.held.iter().any(|(c, _)| *c == command)
    }

    /// Repeats due at `now_ms`, in firing order
    pub fn due(&mut self, now_ms: f64) -> Vec<Command> {
        let mut fired: Vec<(f64, Command)> = Vec::new();
        for (command, next) in self.held.iter_mut() {
            while *next <= now_ms {
                fired.push((*next, *command));
                *next += self.interval_ms;
            }
        }
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        fired.into_iter().map(|(_, c)| c).collect()
    }
}
