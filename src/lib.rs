//! Flap Engine - simulation core for a side-scrolling gap-flying game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, scoring, phases)
//! - `platform`: Host layer (intent buffering, frame clock, session ownership)
//! - `persistence`: Key/value storage interface used for the high score and settings
//! - `tuning`: Data-driven world geometry and fixed constants
//! - `audio`: Fire-and-forget sound cues derived from simulation events

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use settings::{AudioSettings, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest elapsed time accepted for a single tick (seconds)
    pub const MAX_DT: f32 = 0.1;

    /// Nominal frame interval used by headless hosts (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Visual tilt per unit of vertical velocity (radians per px/s)
    pub const TILT_FACTOR: f32 = 0.002;
    /// Tilt saturates at +/- this many radians
    pub const TILT_MAX: f32 = 0.5;
}

/// Clamp a host-supplied elapsed time into `[0, max_dt]`.
///
/// Non-finite and negative values collapse to zero so they never integrate.
#[inline]
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}
