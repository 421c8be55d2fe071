//! Collision detection
//!
//! Pure functions only. The body is treated as its axis-aligned bounding box
//! (center +/- radius), which is what the gap test needs.
//!
//! Boundary policy: the ground is fatal, the ceiling is not. A ceiling touch is
//! resolved by [`Body::clamp_to_ceiling`] and never reaches the phase machine.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacles::Obstacle;

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Obstacle,
    Ground,
}

/// Boundary contact outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    None,
    /// Touching or above the top edge (non-fatal)
    Ceiling,
    /// Touching or below the ground (fatal)
    Ground,
}

/// True if the body overlaps the obstacle's solid part.
///
/// Horizontal overlap is strict on both sides; inside the obstacle's span the
/// body must fit entirely within the gap.
pub fn body_obstacle_collision(body: &Body, obstacle: &Obstacle) -> bool {
    let overlaps_x = body.right() > obstacle.x && body.left() < obstacle.right();
    if !overlaps_x {
        return false;
    }
    body.top() < obstacle.gap_top || body.bottom() > obstacle.gap_bottom()
}

pub fn body_boundary_collision(body: &Body, canvas_height: f32) -> Boundary {
    if body.bottom() >= canvas_height {
        Boundary::Ground
    } else if body.top() <= 0.0 {
        Boundary::Ceiling
    } else {
        Boundary::None
    }
}

/// First fatal collision, obstacles before ground
pub fn check_all_collisions<'a>(
    body: &Body,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    canvas_height: f32,
) -> Option<CollisionKind> {
    if obstacles
        .into_iter()
        .any(|o| body_obstacle_collision(body, o))
    {
        return Some(CollisionKind::Obstacle);
    }
    match body_boundary_collision(body, canvas_height) {
        Boundary::Ground => Some(CollisionKind::Ground),
        Boundary::Ceiling | Boundary::None => None,
    }
}
