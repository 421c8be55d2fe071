//! Pending-intent buffer
//!
//! Event handlers only ever write here. The tick drains the whole buffer in
//! one step, so a tick never sees input that arrived halfway through it.

use crate::sim::{Difficulty, TickInput};

/// One discrete input request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Flap,
    TogglePause,
    /// Pause a live round; a no-op otherwise (focus loss)
    Pause,
    SelectDifficulty(Difficulty),
    Start,
    Restart,
    ReturnToMenu,
}

/// Intents accumulated since the last drain
#[derive(Debug, Clone, Default)]
pub struct IntentBuffer {
    pending: TickInput,
    /// Toggle requests count, so two presses in one frame cancel out
    pause_toggles: u32,
}

impl IntentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        match intent {
            Intent::Flap => self.pending.flap = true,
            Intent::TogglePause => self.pause_toggles += 1,
            Intent::Pause => self.pending.pause = true,
            Intent::SelectDifficulty(d) => self.pending.select_difficulty = Some(d),
            Intent::Start => self.pending.start = true,
            Intent::Restart => self.pending.restart = true,
            Intent::ReturnToMenu => self.pending.return_to_menu = true,
        }
    }

    /// Difficulty selection surface: unknown keys are dropped
    pub fn select_difficulty_key(&mut self, key: &str) -> bool {
        match Difficulty::from_key(key) {
            Some(d) => {
                self.push(Intent::SelectDifficulty(d));
                true
            }
            None => {
                log::debug!("Ignoring unknown difficulty key {:?}", key);
                false
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.pause_toggles == 0
    }

    /// Take everything buffered and leave the buffer empty
    pub fn drain(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.toggle_pause = self.pause_toggles % 2 == 1;
        self.pause_toggles = 0;
        input
    }
}
