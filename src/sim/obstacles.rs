//! Scrolling obstacle field
//!
//! Obstacles live in a deque in spawn order. New obstacles always enter at the
//! right edge and everything scrolls at one speed, so spawn order is also
//! descending-x order: push only at the back, pop only at the front.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyParams;
use crate::tuning::Tuning;

/// A vertical barrier with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Offset of the gap's upper edge from the top of the playfield
    pub gap_top: f32,
    /// Vertical size of the gap
    pub gap_height: f32,
    pub width: f32,
    /// Set once the body has fully cleared this obstacle; never reset
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_height * 0.5
    }
}

/// Ordered collection of live obstacles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    /// Oldest (leftmost) obstacle
    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    /// Newest (rightmost) obstacle
    pub fn back(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    /// Scroll, cull, then spawn. Returns true if an obstacle was spawned.
    pub fn step<R: Rng>(
        &mut self,
        tuning: &Tuning,
        params: &DifficultyParams,
        dt: f32,
        rng: &mut R,
    ) -> bool {
        self.scroll(params.obstacle_speed * dt);
        self.cull(tuning.cull_margin);
        if self.spawn_due(tuning) {
            self.spawn(tuning, params, rng);
            true
        } else {
            false
        }
    }

    /// Move every obstacle left by `distance`
    pub fn scroll(&mut self, distance: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= distance;
        }
    }

    /// Drop obstacles that are fully off the left edge. Returns how many were removed.
    pub fn cull(&mut self, margin: f32) -> usize {
        let mut removed = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.right() < -margin)
        {
            self.obstacles.pop_front();
            removed += 1;
        }
        removed
    }

    fn spawn_due(&self, tuning: &Tuning) -> bool {
        match self.obstacles.back() {
            None => true,
            Some(newest) => newest.x <= tuning.canvas_width - tuning.spawn_interval,
        }
    }

    /// Append a new obstacle at the right edge with a random gap position
    pub fn spawn<R: Rng>(&mut self, tuning: &Tuning, params: &DifficultyParams, rng: &mut R) {
        let min_top = tuning.gap_margin_top;
        let max_top = tuning.canvas_height - params.gap_size - tuning.gap_margin_bottom;
        let gap_top = if max_top > min_top {
            rng.random_range(min_top..=max_top)
        } else {
            min_top
        };

        self.push(Obstacle {
            x: tuning.canvas_width,
            gap_top,
            gap_height: params.gap_size,
            width: tuning.obstacle_width,
            passed: false,
        });
    }

    /// Append at the tail. Obstacles left of the current newest are rejected
    /// since they would break the descending-x order.
    pub fn push(&mut self, obstacle: Obstacle) -> bool {
        if self.obstacles.back().is_some_and(|newest| obstacle.x < newest.x) {
            log::warn!(
                "Rejected out-of-order obstacle at x={} (newest at x={:?})",
                obstacle.x,
                self.obstacles.back().map(|o| o.x)
            );
            return false;
        }
        self.obstacles.push_back(obstacle);
        true
    }

    /// True if obstacles are in spawn order (oldest has the smallest x)
    pub fn is_ordered(&self) -> bool {
        self.obstacles
            .iter()
            .zip(self.obstacles.iter().skip(1))
            .all(|(older, newer)| older.x <= newer.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::{Difficulty, DifficultyProfile};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn medium() -> DifficultyParams {
        DifficultyProfile::default().params_for(Difficulty::Medium)
    }

    #[test]
    fn test_first_step_spawns_at_right_edge() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(field.step(&tuning, &medium(), 0.016, &mut rng));
        let o = field.back().unwrap();
        assert_eq!(o.x, tuning.canvas_width);
        assert_eq!(o.gap_height, 150.0);
        assert_eq!(o.width, tuning.obstacle_width);
        assert!(!o.passed);
    }

    #[test]
    fn test_gap_stays_within_margins() {
        let tuning = Tuning::default();
        let params = medium();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        for _ in 0..200 {
            field.spawn(&tuning, &params, &mut rng);
        }
        for o in field.iter() {
            assert!(o.gap_top >= tuning.gap_margin_top);
            assert!(o.gap_bottom() <= tuning.canvas_height - tuning.gap_margin_bottom);
        }
    }

    #[test]
    fn test_gap_collapses_to_top_margin_when_too_large() {
        let tuning = Tuning::default();
        let params = DifficultyParams {
            gap_size: 580.0,
            ..medium()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = ObstacleField::new();
        field.spawn(&tuning, &params, &mut rng);
        assert_eq!(field.back().unwrap().gap_top, tuning.gap_margin_top);
    }

    #[test]
    fn test_spawn_cadence() {
        let tuning = Tuning::default();
        let params = medium();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new();
        field.step(&tuning, &params, 0.0, &mut rng);
        assert_eq!(field.len(), 1);

        // 150 px/s for 1.3 s = 195 px, just short of the 200 px interval
        field.step(&tuning, &params, 1.3, &mut rng);
        assert_eq!(field.len(), 1);

        field.step(&tuning, &params, 0.05, &mut rng);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_cull_only_removes_fully_offscreen_head() {
        let mut field = ObstacleField::new();
        field.push(Obstacle {
            x: -111.0,
            gap_top: 100.0,
            gap_height: 150.0,
            width: 60.0,
            passed: true,
        });
        field.push(Obstacle {
            x: -109.0,
            gap_top: 100.0,
            gap_height: 150.0,
            width: 60.0,
            passed: true,
        });
        assert_eq!(field.cull(50.0), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.front().unwrap().x, -109.0);
    }

    #[test]
    fn test_push_rejects_out_of_order() {
        let mut field = ObstacleField::new();
        let o = Obstacle {
            x: 200.0,
            gap_top: 100.0,
            gap_height: 150.0,
            width: 60.0,
            passed: false,
        };
        assert!(field.push(o.clone()));
        assert!(!field.push(Obstacle { x: 150.0, ..o }));
        assert_eq!(field.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_order_survives_any_step_sequence(
            seed in any::<u64>(),
            dts in proptest::collection::vec(0.0f32..0.1, 1..600),
        ) {
            let tuning = Tuning::default();
            let profile = DifficultyProfile::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut field = ObstacleField::new();
            for (i, dt) in dts.iter().enumerate() {
                let params = profile.params_for(Difficulty::ALL[i % 3]);
                field.step(&tuning, &params, *dt, &mut rng);
                prop_assert!(field.is_ordered());
                prop_assert!(field.back().is_some_and(|o| o.x <= tuning.canvas_width));
            }
        }
    }
}
