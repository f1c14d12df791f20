//! Tire trail history
//!
//! Each rear tire leaves its own bounded trail. Points are stamped with a
//! fixed life that decays over real time; the renderer fades segments by the
//! mean life of their endpoints.

use std::collections::VecDeque;

use crate::math::Vec2;

/// Scale applied to the configured decay rate
const DECAY_SCALE: f32 = 0.6;

/// Global alpha at or below which trails are not drawn at all
pub const MIN_VISIBLE_ALPHA: f32 = 0.01;

/// One stamped tire contact point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub life: f32,
}

/// A drawable piece of a trail polyline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// Bounded, time-ordered trail of one tire (oldest at the front)
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
    max_len: usize,
}

impl TrailBuffer {
    /// Create an empty trail holding at most `max_len` points
    pub fn new(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len),
            max_len: max_len.max(1),
        }
    }

    /// Push a new point, evicting the oldest ones past the cap
    pub fn append(&mut self, position: Vec2, initial_life: f32) {
        self.points.push_back(TrailPoint {
            position,
            life: initial_life,
        });
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    /// Age every point, then drop dead points from the front.
    ///
    /// Only the front is trimmed; a dead point sitting behind a live one
    /// stays in the buffer but is never drawn (see [`segments`](Self::segments)).
    pub fn decay(&mut self, delta_seconds: f32, decay_rate: f32) {
        let amount = DECAY_SCALE * decay_rate * delta_seconds.max(0.0);
        for point in self.points.iter_mut() {
            point.life -= amount;
        }
        while self.points.front().is_some_and(|p| p.life <= 0.0) {
            self.points.pop_front();
        }
    }

    /// Drop every point
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// Visible segments of the polyline, faded by `alpha_scale`
    pub fn segments(&self, alpha_scale: f32) -> Vec<TrailSegment> {
        if self.points.len() < 2 || alpha_scale <= MIN_VISIBLE_ALPHA {
            return Vec::new();
        }

        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .filter(|(a, b)| a.life > 0.0 && b.life > 0.0)
            .filter_map(|(a, b)| {
                let alpha = ((a.life + b.life) * 0.5).clamp(0.0, 1.0) * alpha_scale;
                (alpha > 0.0).then_some(TrailSegment {
                    from: a.position,
                    to: b.position,
                    alpha,
                })
            })
            .collect()
    }
}

/// The pair of rear-tire trails
#[derive(Clone, Debug)]
pub struct TireTrails {
    pub left: TrailBuffer,
    pub right: TrailBuffer,
}

impl TireTrails {
    pub fn new(max_len: usize) -> Self {
        Self {
            left: TrailBuffer::new(max_len),
            right: TrailBuffer::new(max_len),
        }
    }

    /// Stamp both tires
    pub fn append(&mut self, left: Vec2, right: Vec2, initial_life: f32) {
        self.left.append(left, initial_life);
        self.right.append(right, initial_life);
    }

    pub fn decay(&mut self, delta_seconds: f32, decay_rate: f32) {
        self.left.decay(delta_seconds, decay_rate);
        self.right.decay(delta_seconds, decay_rate);
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 {
        Vec2::new(x, 0.0)
    }

    #[test]
    fn test_append_caps_length_oldest_first() {
        let mut trail = TrailBuffer::new(3);
        for i in 0..5 {
            trail.append(p(i as f32), 1.0);
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.points().map(|pt| pt.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_decay_amount() {
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 1.0);
        trail.decay(0.5, 1.0);
        let life = trail.points().next().map(|pt| pt.life).unwrap_or_default();
        assert!((life - 0.7).abs() < 0.0001);
    }

    #[test]
    fn test_decay_evicts_dead_front() {
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 0.1);
        trail.append(p(1.0), 0.1);
        trail.append(p(2.0), 1.0);
        trail.decay(0.2, 1.0); // -0.12
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.points().next().map(|pt| pt.position), Some(p(2.0)));
    }

    #[test]
    fn test_dead_point_behind_live_point_is_kept_but_not_drawn() {
        // Out-of-order lives: live oldest, dead middle, live newest
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 1.0);
        trail.append(p(1.0), 0.05);
        trail.append(p(2.0), 1.0);
        trail.decay(0.1, 1.0); // -0.06, middle goes negative

        // Front-only eviction leaves the dead middle point in place
        assert_eq!(trail.len(), 3);
        // ...but neither segment touching it is rendered
        assert!(trail.segments(1.0).is_empty());
    }

    #[test]
    fn test_segments_alpha() {
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 0.4);
        trail.append(p(1.0), 0.8);
        let segments = trail.segments(0.5);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].alpha - 0.3).abs() < 0.0001);
        assert_eq!(segments[0].from, p(0.0));
        assert_eq!(segments[0].to, p(1.0));
    }

    #[test]
    fn test_segments_hidden_at_near_zero_scale() {
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 1.0);
        trail.append(p(1.0), 1.0);
        assert!(trail.segments(0.01).is_empty());
        assert!(trail.segments(0.0).is_empty());
        assert_eq!(trail.segments(0.02).len(), 1);
    }

    #[test]
    fn test_single_point_has_no_segments() {
        let mut trail = TrailBuffer::new(10);
        trail.append(p(0.0), 1.0);
        assert!(trail.segments(1.0).is_empty());
    }

    #[test]
    fn test_tire_trails_pair() {
        let mut trails = TireTrails::new(4);
        trails.append(p(0.0), p(1.0), 1.0);
        assert_eq!(trails.left.len(), 1);
        assert_eq!(trails.right.len(), 1);
        trails.clear();
        assert!(trails.is_empty());
    }
}
