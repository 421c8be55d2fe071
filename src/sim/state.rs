//! Game state and simulation events
//!
//! One `GameState` value owns everything the tick mutates. Hosts hold it and
//! hand out read-only [`Snapshot`]s to observers.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::CollisionKind;
use super::difficulty::{Difficulty, DifficultyParams, DifficultyProfile};
use super::obstacles::ObstacleField;
use super::phase::GamePhase;
use super::score::ScoreTracker;
use crate::tuning::Tuning;

/// Discrete things that happened during a tick, in order of occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new round began with a fresh body and empty field
    NewGame { difficulty: Difficulty },
    PhaseChanged { from: GamePhase, to: GamePhase },
    DifficultyChanged { difficulty: Difficulty },
    Flap,
    /// Fatal contact; the round is over
    Collision { kind: CollisionKind },
    Scored { score: u32 },
    Milestone { threshold: u32 },
    /// The high score was raised and should be persisted
    HighScore { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG
    pub rng: Pcg32,
    /// World geometry
    pub tuning: Tuning,
    /// Difficulty table, consulted every tick
    pub profile: DifficultyProfile,
    /// Selected difficulty; changes only while not in a round
    pub difficulty: Difficulty,
    /// Current phase
    pub phase: GamePhase,
    pub body: Body,
    pub obstacles: ObstacleField,
    pub score: ScoreTracker,
    /// Simulated ticks since the state was created
    pub time_ticks: u64,
    /// Simulated seconds in the current round
    pub round_time: f32,
}

impl GameState {
    /// Create a state in the menu phase with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.normalized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            body: Body::spawn(&tuning),
            obstacles: ObstacleField::new(),
            score: ScoreTracker::new(&tuning.milestones, 0),
            tuning,
            profile: DifficultyProfile::default(),
            difficulty: Difficulty::default(),
            phase: GamePhase::Menu,
            time_ticks: 0,
            round_time: 0.0,
        }
    }

    /// Parameters for the selected difficulty
    #[inline]
    pub fn params(&self) -> DifficultyParams {
        self.profile.params_for(self.difficulty)
    }

    /// Recreate body and obstacles and zero the round score
    pub fn reset_round(&mut self) {
        self.body = Body::spawn(&self.tuning);
        self.obstacles = ObstacleField::new();
        self.score.reset_current();
        self.round_time = 0.0;
    }

    /// Read-only view for renderers and HUDs
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: &self.body,
            obstacles: &self.obstacles,
            score: self.score.current,
            high_score: self.score.high,
            phase: self.phase,
            difficulty: self.difficulty,
            milestones: self.score.milestones(),
        }
    }
}

/// Borrowed per-frame view of the simulation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub body: &'a Body,
    pub obstacles: &'a ObstacleField,
    pub score: u32,
    pub high_score: u32,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub milestones: &'a [u32],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.difficulty, Difficulty::Medium);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.body.y(), state.tuning.body_start_y);
        assert_eq!(state.score.milestones(), &[10, 25, 50, 100]);
    }

    #[test]
    fn test_reset_round_keeps_high_score() {
        let mut state = GameState::new(1);
        state.score.current = 12;
        state.score.high = 20;
        state.body.velocity = 300.0;
        state.reset_round();
        assert_eq!(state.score.current, 0);
        assert_eq!(state.score.high, 20);
        assert_eq!(state.body.velocity, 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "menu");
        assert_eq!(json["difficulty"], "medium");
        assert_eq!(json["score"], 0);
        assert!(json["obstacles"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(GameEvent::Milestone { threshold: 25 }).unwrap();
        assert_eq!(json["type"], "milestone");
        assert_eq!(json["threshold"], 25);
    }
}
