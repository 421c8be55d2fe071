//! Simulation tick
//!
//! Core game loop step: `(state, intents, dt) -> events`.

use super::collision::check_all_collisions;
use super::difficulty::Difficulty;
use super::phase::{apply_intents, end_round};
use super::score::ScoreTracker;
use super::state::{GameEvent, GameState};
use crate::sanitize_dt;

/// Intents buffered since the previous tick (edge-triggered, consumed once)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Upward impulse
    pub flap: bool,
    /// Pause or resume
    pub toggle_pause: bool,
    /// Pause if playing; never resumes, so repeats are harmless
    pub pause: bool,
    /// Requested difficulty; ignored while a round is live
    pub select_difficulty: Option<Difficulty>,
    /// Begin a new game from the menu or game over screen
    pub start: bool,
    /// Begin a new game from the pause or game over screen
    pub restart: bool,
    /// Abandon the round and go back to the menu
    pub return_to_menu: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_phase_intent(&self) -> bool {
        self.toggle_pause || self.pause || self.start || self.restart || self.return_to_menu
    }
}

/// Advance the game state by `dt` seconds and report what happened.
///
/// Intents are applied first. Outside Playing nothing else runs. `dt` is
/// clamped to the tuning's ceiling; a zero or negative `dt` integrates nothing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    apply_intents(state, input, &mut events);

    if !state.phase.is_simulating() {
        return events;
    }

    let dt = sanitize_dt(dt, state.tuning.max_dt);
    if dt == 0.0 {
        return events;
    }

    state.time_ticks += 1;
    state.round_time += dt;
    let params = state.params();

    // Body
    state
        .body
        .integrate(&params, dt, state.tuning.tilt_factor, state.tuning.tilt_max);
    state.body.clamp_to_ceiling();

    // Obstacles
    state
        .obstacles
        .step(&state.tuning, &params, dt, &mut state.rng);

    // Collisions end the tick
    if let Some(kind) =
        check_all_collisions(&state.body, state.obstacles.iter(), state.tuning.canvas_height)
    {
        end_round(state, kind, &mut events);
        return events;
    }

    // Scoring
    let passed = ScoreTracker::mark_passed(&state.body, &mut state.obstacles);
    state.score.add(passed, &mut events);

    events
}
