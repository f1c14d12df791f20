//! Easing functions for drift motion

use crate::math::MIN_DIVISOR;

/// Smooth-step: clamped cubic `t²(3 - 2t)`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Power-law ease-in: slow start, fast arrival
#[inline]
pub fn ease_in_pow(t: f32, exponent: f32) -> f32 {
    t.clamp(0.0, 1.0).powf(exponent.max(MIN_DIVISOR))
}

/// Inverse of [`ease_in_pow`]: the raw progress at which `eased` is reached
#[inline]
pub fn ease_in_pow_inverse(eased: f32, exponent: f32) -> f32 {
    eased.clamp(0.0, 1.0).powf(1.0 / exponent.max(MIN_DIVISOR))
}

/// Slope of [`ease_in_pow`] at `t = 1`
#[inline]
pub fn ease_in_pow_end_slope(exponent: f32) -> f32 {
    exponent.max(MIN_DIVISOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep() {
        assert!((smoothstep(0.0) - 0.0).abs() < 0.001);
        assert!((smoothstep(1.0) - 1.0).abs() < 0.001);
        assert!((smoothstep(0.5) - 0.5).abs() < 0.001);
        // Clamped outside [0, 1]
        assert!((smoothstep(-3.0) - 0.0).abs() < 0.001);
        assert!((smoothstep(7.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(2.0, 6.0, 0.0) - 2.0).abs() < 0.001);
        assert!((lerp(2.0, 6.0, 0.25) - 3.0).abs() < 0.001);
        assert!((lerp(2.0, 6.0, 1.0) - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_ease_in_pow() {
        assert!((ease_in_pow(0.5, 2.0) - 0.25).abs() < 0.001);
        assert!((ease_in_pow(0.5, 1.0) - 0.5).abs() < 0.001);
        assert!((ease_in_pow(1.0, 3.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ease_in_pow_inverse() {
        assert!((ease_in_pow_inverse(0.25, 2.0) - 0.5).abs() < 0.001);
        assert!((ease_in_pow_inverse(0.0, 2.0) - 0.0).abs() < 0.001);
        assert!((ease_in_pow_inverse(1.0, 2.0) - 1.0).abs() < 0.001);
    }
}
