//! Frame timing
//!
//! Hosts report a monotonic timestamp in milliseconds (e.g. the
//! `requestAnimationFrame` argument); the clock turns it into elapsed seconds.

use crate::sanitize_dt;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call, clamped to `[0, max_dt]`.
    /// The first call after construction yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        sanitize_dt(dt, self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(5_000.0), 0.0);
        assert!((clock.advance(5_016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        assert_eq!(clock.advance(3_000.0), 0.1);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(1_000.0);
        assert_eq!(clock.advance(900.0), 0.0);
        assert!((clock.advance(916.0) - 0.016).abs() < 1e-6);
    }
}
