//! Score, milestones, and high score bookkeeping

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::obstacles::ObstacleField;
use super::state::GameEvent;

/// Current and best score plus milestone thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    /// Score of the round in progress
    pub current: u32,
    /// Best score seen; only raised by play or replaced by [`ScoreTracker::overwrite_high`]
    pub high: u32,
    /// Ascending thresholds
    milestones: Vec<u32>,
}

impl ScoreTracker {
    pub fn new(milestones: &[u32], high: u32) -> Self {
        let mut milestones = milestones.to_vec();
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            current: 0,
            high,
            milestones,
        }
    }

    pub fn milestones(&self) -> &[u32] {
        &self.milestones
    }

    /// Start-of-game reset; the high score survives
    pub fn reset_current(&mut self) {
        self.current = 0;
    }

    /// Explicit overwrite of the high score, negatives clamp to zero
    pub fn overwrite_high(&mut self, value: i64) {
        self.high = value.clamp(0, u32::MAX as i64) as u32;
    }

    /// Mark every obstacle the body has fully cleared and score it once.
    /// Returns the number of newly passed obstacles.
    pub fn mark_passed(body: &Body, field: &mut ObstacleField) -> u32 {
        let body_left = body.left();
        let mut newly_passed = 0;
        for obstacle in field.iter_mut() {
            if !obstacle.passed && obstacle.right() < body_left {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// Add `points`, emitting score, milestone, and high score events
    pub fn add(&mut self, points: u32, events: &mut Vec<GameEvent>) {
        if points == 0 {
            return;
        }
        let previous = self.current;
        self.current = self.current.saturating_add(points);
        events.push(GameEvent::Scored {
            score: self.current,
        });

        for &threshold in self.crossed(previous, self.current) {
            log::info!("Milestone reached: {}", threshold);
            events.push(GameEvent::Milestone { threshold });
        }

        if self.current > self.high {
            self.high = self.current;
            events.push(GameEvent::HighScore { score: self.high });
        }
    }

    /// Thresholds `m` with `previous < m <= current`
    fn crossed(&self, previous: u32, current: u32) -> &[u32] {
        let start = self.milestones.partition_point(|&m| m <= previous);
        let end = self.milestones.partition_point(|&m| m <= current);
        &self.milestones[start..end]
    }
}
