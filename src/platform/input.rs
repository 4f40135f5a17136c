//! Keyboard mapping
//!
//! Arrow keys become held flags sampled each tick; `S`, `P` and `R` become
//! one-shot commands for the phase state machine.

use crate::sim::{GameState, TickInput};

/// One-shot phase transition requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
}

impl Command {
    /// Map a `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "s" | "S" => Some(Command::Start),
            "p" | "P" => Some(Command::TogglePause),
            "r" | "R" => Some(Command::Reset),
            _ => None,
        }
    }

    /// Apply to the game. Returns false when the transition was a no-op.
    pub fn apply(self, state: &mut GameState) -> bool {
        match self {
            Command::Start => state.start(),
            Command::TogglePause => state.toggle_pause(),
            Command::Reset => {
                state.reset();
                true
            }
        }
    }
}

/// Tracks which direction keys are currently held
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    input: TickInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press; returns the command it triggers, if any
    pub fn key_down(&mut self, key: &str) -> Option<Command> {
        match key {
            "ArrowLeft" => self.input.left_held = true,
            "ArrowRight" => self.input.right_held = true,
            _ => return Command::from_key(key),
        }
        None
    }

    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowLeft" => self.input.left_held = false,
            "ArrowRight" => self.input.right_held = false,
            _ => {}
        }
    }

    /// Release everything (window lost focus, keyup will never arrive)
    pub fn release_all(&mut self) {
        self.input = TickInput::default();
    }

    pub fn tick_input(&self) -> TickInput {
        self.input
    }
}
