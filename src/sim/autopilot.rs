//! Demo-mode controller
//!
//! Steers toward the gap of the next obstacle the body has not cleared yet.
//! Good enough for attract screens and soak runs, not a perfect player.

use super::state::GameState;

/// Seconds of ballistic lookahead when predicting the body's position
const LOOKAHEAD: f32 = 0.12;

/// Aim slightly below the gap center since a flap carries the body upward
const AIM_BIAS: f32 = 0.15;

/// Decide whether to flap on the coming tick
pub fn should_flap(state: &GameState) -> bool {
    if !state.phase.is_simulating() {
        return false;
    }

    let body = &state.body;
    let params = state.params();

    let target = state
        .obstacles
        .iter()
        .find(|o| o.right() >= body.left())
        .map(|o| o.gap_center() + o.gap_height * AIM_BIAS)
        .unwrap_or(state.tuning.canvas_height * 0.5);

    let predicted =
        body.y() + body.velocity * LOOKAHEAD + 0.5 * params.gravity * LOOKAHEAD * LOOKAHEAD;

    // Don't stack flaps while still rising fast
    let rising_fast = body.velocity < -params.flap_impulse * 0.5;

    predicted > target && !rising_fast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::tick::{TickInput, tick};

    fn playing() -> GameState {
        let mut state = GameState::new(42);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, 0.0);
        state
    }

    #[test]
    fn test_idle_outside_play() {
        let state = GameState::new(42);
        assert!(!should_flap(&state));
    }

    #[test]
    fn test_flaps_when_below_target() {
        let mut state = playing();
        state.body.pos.y = 500.0;
        assert!(should_flap(&state));

        state.body.pos.y = 100.0;
        assert!(!should_flap(&state));
    }

    #[test]
    fn test_no_double_flap_while_rising() {
        let mut state = playing();
        state.body.pos.y = 500.0;
        state.body.velocity = -state.params().flap_impulse;
        assert!(!should_flap(&state));
    }

    #[test]
    fn test_targets_next_uncleared_gap() {
        let mut state = playing();
        state.obstacles.push(Obstacle {
            x: 200.0,
            gap_top: 50.0,
            gap_height: 150.0,
            width: 60.0,
            passed: false,
        });
        // Below a high gap: climb
        state.body.pos.y = 300.0;
        assert!(should_flap(&state));
    }
}
