//! Eased straight-line motion used for the entry and exit runs

use super::easing::{ease_in_pow, ease_in_pow_end_slope, ease_in_pow_inverse};
use crate::math::{Vec2, MIN_DIVISOR};

/// Straight run from `from` to `to` with power-law acceleration.
///
/// Times are on the simulation clock (seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMotion {
    pub from: Vec2,
    pub to: Vec2,
    pub start_time: f64,
    pub duration: f32,
    pub exponent: f32,
}

impl LineMotion {
    /// Create a new line motion
    pub fn new(from: Vec2, to: Vec2, start_time: f64, duration: f32, exponent: f32) -> Self {
        Self {
            from,
            to,
            start_time,
            duration: duration.max(MIN_DIVISOR),
            exponent,
        }
    }

    /// Shift the start backwards so `traveled` pixels are already covered
    /// at `now`, keeping the eased curve continuous.
    pub fn with_carried_distance(mut self, traveled: f32, now: f64) -> Self {
        let fraction = (traveled / self.length().max(MIN_DIVISOR)).clamp(0.0, 1.0);
        let raw = ease_in_pow_inverse(fraction, self.exponent);
        self.start_time = now - (raw * self.duration) as f64;
        self
    }

    /// Total length of the run
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Raw time progress (0.0 to 1.0)
    pub fn progress(&self, now: f64) -> f32 {
        let elapsed = (now - self.start_time) as f32;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Eased position at `now`
    pub fn position(&self, now: f64) -> Vec2 {
        let eased = ease_in_pow(self.progress(now), self.exponent);
        self.from.lerp(self.to, eased)
    }

    /// Direction of travel
    pub fn heading(&self) -> f32 {
        (self.to - self.from).heading()
    }

    /// Check if the run is complete
    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Time spent past the end of the run (zero while still running)
    pub fn overshoot(&self, now: f64) -> f32 {
        let past = (now - self.start_time) as f32 - self.duration;
        past.max(0.0)
    }

    /// Linear speed at the end of the run (px/s)
    pub fn end_speed(&self) -> f32 {
        ease_in_pow_end_slope(self.exponent) * self.length() / self.duration
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Later timestamps never move the run backwards
        #[test]
        fn line_never_goes_backward(
            fx in -2000.0f32..2000.0,
            fy in -2000.0f32..2000.0,
            tx in -2000.0f32..2000.0,
            ty in -2000.0f32..2000.0,
            start in -10.0f64..10.0,
            duration in 0.01f32..5.0,
            exponent in 1.0f32..4.0,
            steps in prop::collection::vec(0.0f64..0.25, 1..80),
        ) {
            let from = Vec2::new(fx, fy);
            let line = LineMotion::new(from, Vec2::new(tx, ty), start, duration, exponent);

            let mut now = start - 0.5;
            let mut last_progress = line.progress(now);
            let mut last_distance = line.position(now).distance(from);
            for step in steps {
                now += step;
                let progress = line.progress(now);
                let distance = line.position(now).distance(from);
                prop_assert!(progress >= last_progress, "progress fell {} -> {} at {}", last_progress, progress, now);
                prop_assert!(distance >= last_distance - 1e-3, "distance fell {} -> {} at {}", last_distance, distance, now);
                last_progress = progress;
                last_distance = distance;
            }
        }
    }
}
