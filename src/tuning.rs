//! Data-driven world geometry
//!
//! Everything here is fixed for the lifetime of a session; per-difficulty
//! physics lives in [`crate::sim::difficulty`].

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DT, TILT_FACTOR, TILT_MAX};

/// World dimensions, spawn cadence, and other fixed constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width (px)
    pub canvas_width: f32,
    /// Playfield height (px); the ground sits at this y
    pub canvas_height: f32,
    /// Fixed horizontal position of the body center
    pub body_x: f32,
    /// Body center y at the start of a game
    pub body_start_y: f32,
    /// Body collision radius
    pub body_radius: f32,
    /// Horizontal thickness of every obstacle
    pub obstacle_width: f32,
    /// Distance the newest obstacle must travel from the right edge before the next spawns
    pub spawn_interval: f32,
    /// Extra distance past the left edge before an obstacle is culled
    pub cull_margin: f32,
    /// Minimum gap-top offset from the top of the playfield
    pub gap_margin_top: f32,
    /// Minimum distance between the gap bottom and the ground
    pub gap_margin_bottom: f32,
    /// Score thresholds that fire a milestone event (ascending)
    pub milestones: Vec<u32>,
    /// Elapsed-time ceiling for one tick (seconds)
    pub max_dt: f32,
    /// Tilt per unit of vertical velocity
    pub tilt_factor: f32,
    /// Tilt clamp (radians)
    pub tilt_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 600.0,
            body_x: 100.0,
            body_start_y: 300.0,
            body_radius: 15.0,
            obstacle_width: 60.0,
            spawn_interval: 200.0,
            cull_margin: 50.0,
            gap_margin_top: 50.0,
            gap_margin_bottom: 50.0,
            milestones: vec![10, 25, 50, 100],
            max_dt: MAX_DT,
            tilt_factor: TILT_FACTOR,
            tilt_max: TILT_MAX,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.normalized())
    }

    /// Sort and de-duplicate milestones so crossing scans can walk them in order
    pub fn normalized(mut self) -> Self {
        self.milestones.sort_unstable();
        self.milestones.dedup();
        self.max_dt = if self.max_dt.is_finite() && self.max_dt > 0.0 {
            self.max_dt
        } else {
            MAX_DT
        };
        self
    }
}
