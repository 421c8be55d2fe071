//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is supplied by the caller and clamped
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering, audio, or storage dependencies; side effects leave as [`GameEvent`]s

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod phase;
pub mod score;
pub mod state;
pub mod tick;

pub use autopilot::should_flap;
pub use body::Body;
pub use collision::{
    CollisionKind, body_boundary_collision, body_obstacle_collision, check_all_collisions,
};
pub use difficulty::{Difficulty, DifficultyParams, DifficultyProfile};
pub use obstacles::{Obstacle, ObstacleField};
pub use phase::GamePhase;
pub use score::ScoreTracker;
pub use state::{GameEvent, GameState, Snapshot};
pub use tick::{TickInput, tick};
