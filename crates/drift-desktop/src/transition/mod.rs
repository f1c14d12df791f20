//! Animation primitives for the scripted entry and exit runs

mod easing;
mod line;

pub use easing::{ease_in_pow, ease_in_pow_end_slope, ease_in_pow_inverse, lerp, smoothstep};
pub use line::LineMotion;
