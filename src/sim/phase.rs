//! Phase state machine
//!
//! | from     | intent          | to                 |
//! |----------|-----------------|--------------------|
//! | Menu     | start           | Playing (new game) |
//! | Playing  | toggle_pause    | Paused             |
//! | Playing  | pause           | Paused             |
//! | Paused   | toggle_pause    | Playing            |
//! | Paused   | restart         | Playing (new game) |
//! | Paused   | return_to_menu  | Menu               |
//! | Playing  | fatal collision | GameOver           |
//! | GameOver | start, restart  | Playing (new game) |
//! | GameOver | return_to_menu  | Menu               |
//!
//! Difficulty is locked while a round is live (Playing or Paused).

use serde::{Deserialize, Serialize};

use super::collision::CollisionKind;
use super::state::{GameEvent, GameState};
use super::tick::TickInput;

/// Coarse game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for the player to start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Round frozen, resumable
    Paused,
    /// Round ended by a collision
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }

    /// Only Playing advances the simulation
    #[inline]
    pub fn is_simulating(&self) -> bool {
        *self == GamePhase::Playing
    }

    #[inline]
    pub fn accepts_difficulty_change(&self) -> bool {
        matches!(self, GamePhase::Menu | GamePhase::GameOver)
    }
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from != to {
        state.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }
}

/// Recreate the round and enter Playing
fn begin_new_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.reset_round();
    log::info!(
        "New game on {} (high score {})",
        state.difficulty.as_str(),
        state.score.high
    );
    events.push(GameEvent::NewGame {
        difficulty: state.difficulty,
    });
    set_phase(state, GamePhase::Playing, events);
}

/// Apply buffered intents at the start of a tick.
///
/// The difficulty request is applied first so "select and start" in one frame
/// starts on the new difficulty. At most one phase intent takes effect, in
/// priority order: return to menu, restart, start, pause or toggle pause. A flap only
/// lands if the tick ends up in Playing.
pub fn apply_intents(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if let Some(difficulty) = input.select_difficulty {
        if !state.phase.accepts_difficulty_change() {
            log::debug!(
                "Ignoring difficulty change to {} during {}",
                difficulty.as_str(),
                state.phase.as_str()
            );
        } else if difficulty != state.difficulty {
            state.difficulty = difficulty;
            log::info!("Difficulty set to {}", difficulty.as_str());
            events.push(GameEvent::DifficultyChanged { difficulty });
        }
    }

    let phase = state.phase;
    if input.return_to_menu && matches!(phase, GamePhase::Paused | GamePhase::GameOver) {
        state.reset_round();
        set_phase(state, GamePhase::Menu, events);
    } else if input.restart && matches!(phase, GamePhase::Paused | GamePhase::GameOver) {
        begin_new_game(state, events);
    } else if input.start && matches!(phase, GamePhase::Menu | GamePhase::GameOver) {
        begin_new_game(state, events);
    } else if (input.pause || input.toggle_pause) && phase == GamePhase::Playing {
        set_phase(state, GamePhase::Paused, events);
    } else if input.toggle_pause && !input.pause && phase == GamePhase::Paused {
        set_phase(state, GamePhase::Playing, events);
    } else if input.has_phase_intent() {
        log::debug!("Ignoring phase intent during {}", phase.as_str());
    }

    if input.flap && state.phase.is_simulating() {
        let params = state.params();
        state.body.flap(&params);
        events.push(GameEvent::Flap);
    }
}

/// Automatic transition on a fatal collision
pub fn end_round(state: &mut GameState, kind: CollisionKind, events: &mut Vec<GameEvent>) {
    log::info!(
        "Game over ({:?}) with score {} (high score {})",
        kind,
        state.score.current,
        state.score.high
    );
    events.push(GameEvent::Collision { kind });
    set_phase(state, GamePhase::GameOver, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;

    fn run(state: &mut GameState, input: TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        apply_intents(state, &input, &mut events);
        events
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn toggle() -> TickInput {
        TickInput {
            toggle_pause: true,
            ..Default::default()
        }
    }

    fn select(d: Difficulty) -> TickInput {
        TickInput {
            select_difficulty: Some(d),
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_start_creates_fresh_round() {
        let mut state = GameState::new(5);
        state.score.current = 9;
        state.body.velocity = 120.0;
        let events = run(&mut state, start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.current, 0);
        assert_eq!(state.body.velocity, 0.0);
        assert!(events.contains(&GameEvent::NewGame {
            difficulty: Difficulty::Medium
        }));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Menu,
            to: GamePhase::Playing
        }));
    }

    #[test]
    fn test_pause_and_resume_keep_state() {
        let mut state = GameState::new(5);
        run(&mut state, start());
        state.score.current = 4;
        state.body.velocity = 77.0;

        run(&mut state, toggle());
        assert_eq!(state.phase, GamePhase::Paused);
        run(&mut state, toggle());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.current, 4);
        assert_eq!(state.body.velocity, 77.0);
    }

    #[test]
    fn test_pause_never_resumes() {
        let mut state = GameState::new(5);
        run(&mut state, start());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        run(&mut state, pause.clone());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(run(&mut state, pause.clone()).is_empty());
        assert_eq!(state.phase, GamePhase::Paused);

        // A toggle arriving alongside a pause does not resume
        let both = TickInput {
            toggle_pause: true,
            ..pause
        };
        run(&mut state, both);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_difficulty_locked_during_round() {
        let mut state = GameState::new(5);
        run(&mut state, start());
        let events = run(&mut state, select(Difficulty::Hard));
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert!(events.is_empty());

        run(&mut state, toggle());
        run(&mut state, select(Difficulty::Hard));
        assert_eq!(state.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_open_in_menu_and_game_over() {
        let mut state = GameState::new(5);
        let events = run(&mut state, select(Difficulty::Easy));
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(
            events,
            vec![GameEvent::DifficultyChanged {
                difficulty: Difficulty::Easy
            }]
        );

        state.phase = GamePhase::GameOver;
        run(&mut state, select(Difficulty::Hard));
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_select_and_start_same_tick() {
        let mut state = GameState::new(5);
        let input = TickInput {
            start: true,
            select_difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        run(&mut state, input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_game_over_to_menu_preserves_high_score() {
        let mut state = GameState::new(5);
        run(&mut state, start());
        state.score.current = 3;
        state.score.high = 3;
        let mut events = Vec::new();
        end_round(&mut state, CollisionKind::Ground, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events[0],
            GameEvent::Collision {
                kind: CollisionKind::Ground
            }
        );

        let input = TickInput {
            return_to_menu: true,
            ..Default::default()
        };
        run(&mut state, input);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score.current, 0);
        assert_eq!(state.score.high, 3);
    }

    #[test]
    fn test_restart_from_pause_starts_new_round() {
        let mut state = GameState::new(5);
        run(&mut state, start());
        state.score.current = 6;
        run(&mut state, toggle());
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        run(&mut state, input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.current, 0);
    }

    #[test]
    fn test_intents_ignored_in_wrong_phase() {
        let mut state = GameState::new(5);
        // Cannot pause or restart from the menu
        assert!(run(&mut state, toggle()).is_empty());
        let input = TickInput {
            restart: true,
            return_to_menu: false,
            ..Default::default()
        };
        assert!(run(&mut state, input).is_empty());
        assert_eq!(state.phase, GamePhase::Menu);

        // Start is ignored mid-round
        run(&mut state, start());
        state.score.current = 2;
        run(&mut state, start());
        assert_eq!(state.score.current, 2);
    }

    #[test]
    fn test_flap_only_while_playing() {
        let mut state = GameState::new(5);
        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        assert!(run(&mut state, flap.clone()).is_empty());
        assert_eq!(state.body.velocity, 0.0);

        run(&mut state, start());
        let events = run(&mut state, flap);
        assert_eq!(events, vec![GameEvent::Flap]);
        assert_eq!(state.body.velocity, -state.params().flap_impulse);
    }
}
