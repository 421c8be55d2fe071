//! Body kinematics
//!
//! Semi-implicit Euler: velocity first, then position from the new velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyParams;
use crate::tuning::Tuning;

/// The player-controlled flying body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position; x stays fixed during play
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub velocity: f32,
    /// Visual tilt derived from velocity (radians)
    pub tilt: f32,
    /// Collision radius
    pub radius: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            velocity: 0.0,
            tilt: 0.0,
            radius,
        }
    }

    /// Fresh body at the tuning's start position
    pub fn spawn(tuning: &Tuning) -> Self {
        Self::new(tuning.body_x, tuning.body_start_y, tuning.body_radius)
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Overwrite velocity with the upward impulse
    pub fn flap(&mut self, params: &DifficultyParams) {
        self.velocity = -params.flap_impulse;
    }

    /// Advance velocity, position, and tilt by `dt` seconds
    pub fn integrate(&mut self, params: &DifficultyParams, dt: f32, tilt_factor: f32, tilt_max: f32) {
        self.velocity += params.gravity * dt;
        self.pos.y += self.velocity * dt;
        self.tilt = (self.velocity * tilt_factor).clamp(-tilt_max, tilt_max);
    }

    /// Ceiling is solid but harmless: pin the body below it and kill upward speed.
    /// Returns true if the clamp engaged.
    pub fn clamp_to_ceiling(&mut self) -> bool {
        if self.top() <= 0.0 {
            self.pos.y = self.radius;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }
}
