//! Difficulty presets
//!
//! Each preset bundles the four physics knobs that change between rounds.
//! Units are pixels and seconds throughout.

use serde::{Deserialize, Serialize};

/// Difficulty key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All keys in ascending difficulty
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a selection-surface key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Physics parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Upward speed set by a flap (px/s)
    pub flap_impulse: f32,
    /// Leftward obstacle scroll speed (px/s)
    pub obstacle_speed: f32,
    /// Vertical opening of each newly spawned obstacle (px)
    pub gap_size: f32,
}

/// Lookup table from difficulty to parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub easy: DifficultyParams,
    pub medium: DifficultyParams,
    pub hard: DifficultyParams,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            easy: DifficultyParams {
                gravity: 784.0,
                flap_impulse: 400.0,
                obstacle_speed: 100.0,
                gap_size: 180.0,
            },
            medium: DifficultyParams {
                gravity: 980.0,
                flap_impulse: 350.0,
                obstacle_speed: 150.0,
                gap_size: 150.0,
            },
            hard: DifficultyParams {
                gravity: 1176.0,
                flap_impulse: 300.0,
                obstacle_speed: 200.0,
                gap_size: 120.0,
            },
        }
    }
}

impl DifficultyProfile {
    /// Parameters for `difficulty`. Pure; callers look this up every tick.
    #[inline]
    pub fn params_for(&self, difficulty: Difficulty) -> DifficultyParams {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}
