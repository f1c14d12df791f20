//! Orbit geometry and sprite pose
//!
//! The sprite circles the orbit center with its angle increasing. Slip is the
//! cosmetic offset between where the car points and where it actually goes;
//! tire trails always follow the real travel heading.

use std::f32::consts::FRAC_PI_2;

use crate::config::DriftConfig;
use crate::math::{point_on_circle, travel_heading, Vec2};

/// Slip held while steadily orbiting: tires pointed radially outward
pub const ORBIT_SLIP: f32 = FRAC_PI_2;

/// Where and how to draw the sprite this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    /// Direction of travel
    pub heading: f32,
    /// Visual sprite angle (heading + slip + forward offset)
    pub rotation: f32,
}

impl Pose {
    /// Pose travelling along `heading` with the given slip
    pub fn new(position: Vec2, heading: f32, slip: f32, forward_offset: f32) -> Self {
        Self {
            position,
            heading,
            rotation: heading + slip + forward_offset,
        }
    }
}

/// Rear tire contact offsets in the sprite's local frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TireAnchors {
    rear_x: f32,
    left_y: f32,
    right_y: f32,
    forward_offset: f32,
}

impl TireAnchors {
    /// Scale the reference-artwork anchors to the drawn sprite size
    pub fn from_config(config: &DriftConfig) -> Self {
        let size = config.car_size;
        let scale = size / config.sprite_reference_size;
        Self {
            rear_x: -size * 0.5 + config.tire_rear_from_top_px * scale,
            left_y: -size * 0.5 + config.tire_top_from_left_px * scale,
            right_y: size * 0.5 - config.tire_bottom_from_right_px * scale,
            forward_offset: config.sprite_forward_offset,
        }
    }

    /// World-space (left, right) tire points for a pose.
    ///
    /// Rotated by the travel heading, not the slipped visual rotation.
    pub fn contact_points(&self, pose: &Pose) -> (Vec2, Vec2) {
        let trail_heading = pose.heading + self.forward_offset;
        (
            pose.position
                .offset_rotated(Vec2::new(self.rear_x, self.left_y), trail_heading),
            pose.position
                .offset_rotated(Vec2::new(self.rear_x, self.right_y), trail_heading),
        )
    }
}

/// Circle the sprite drives around
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
}

impl Orbit {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Point on the orbit at `angle`
    pub fn point_at(&self, angle: f32) -> Vec2 {
        point_on_circle(self.center, self.radius, angle)
    }

    /// Sprite pose at `angle` with `slip`
    pub fn pose(&self, angle: f32, slip: f32, forward_offset: f32) -> Pose {
        Pose::new(self.point_at(angle), travel_heading(angle), slip, forward_offset)
    }

    /// Whether `point` lies within the orbit plus `padding`
    pub fn contains(&self, point: Vec2, padding: f32) -> bool {
        self.center.distance(point) <= self.radius + padding
    }
}
