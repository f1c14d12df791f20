//! Core geometry for the drift animation
//!
//! Canvas coordinates are CSS pixels with y growing downwards, so angles
//! increase clockwise on screen.

mod angle;
mod vec2;

pub use angle::{
    forward_delta_to_cardinal, normalize_angle, point_on_circle, travel_heading, CARDINAL_ANGLES,
};
pub use vec2::{Size, Vec2};

/// Floor applied to distances and durations before dividing by them
pub const MIN_DIVISOR: f32 = 0.001;
