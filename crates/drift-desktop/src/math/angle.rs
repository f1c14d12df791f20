use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::Vec2;

/// The four fixed tangent angles, one per canvas edge.
pub const CARDINAL_ANGLES: [f32; 4] = [-FRAC_PI_2, 0.0, FRAC_PI_2, PI];

/// Wrap an angle into (-π, π]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Point on a circle of `radius` around `center` at `angle`
pub fn point_on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(center.x + cos * radius, center.y + sin * radius)
}

/// Direction of travel on the orbit at `angle` while the angle increases
#[inline]
pub fn travel_heading(angle: f32) -> f32 {
    angle + FRAC_PI_2
}

/// Smallest positive forward rotation from `angle` onto a cardinal angle.
///
/// The result lies in `(0, π/2]`; an angle sitting exactly on a cardinal
/// goes on to the next one.
pub fn forward_delta_to_cardinal(angle: f32) -> f32 {
    let delta = (-angle).rem_euclid(FRAC_PI_2);
    if delta.is_nan() || delta <= 0.0 || delta > FRAC_PI_2 {
        FRAC_PI_2
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert!((normalize_angle(0.0)).abs() < 0.0001);
        assert!((normalize_angle(TAU) - 0.0).abs() < 0.0001);
        assert!((normalize_angle(PI) - PI).abs() < 0.0001);
        assert!((normalize_angle(-PI) - PI).abs() < 0.0001);
        assert!((normalize_angle(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 0.001);
        assert!((normalize_angle(-FRAC_PI_2 - TAU) + FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_point_on_circle() {
        let c = Vec2::new(100.0, 50.0);
        let p = point_on_circle(c, 10.0, 0.0);
        assert!((p.x - 110.0).abs() < 0.001);
        assert!((p.y - 50.0).abs() < 0.001);

        let p = point_on_circle(c, 10.0, -FRAC_PI_2);
        assert!((p.x - 100.0).abs() < 0.001);
        assert!((p.y - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_travel_heading_is_tangent() {
        // Derivative of the circle position matches the heading vector
        let c = Vec2::ZERO;
        for &angle in &[0.0f32, 0.7, 2.0, -1.3] {
            let a = point_on_circle(c, 50.0, angle);
            let b = point_on_circle(c, 50.0, angle + 0.001);
            let dir = Vec2::from_heading(travel_heading(angle));
            let step = b - a;
            let dot = (step.x * dir.x + step.y * dir.y) / step.length();
            assert!(dot > 0.999, "heading should follow increasing angle");
        }
    }

    #[test]
    fn test_forward_delta_to_cardinal() {
        assert_eq!(forward_delta_to_cardinal(0.0), FRAC_PI_2);
        assert_eq!(forward_delta_to_cardinal(PI), FRAC_PI_2);
        assert!((forward_delta_to_cardinal(0.1) - (FRAC_PI_2 - 0.1)).abs() < 0.0001);
        assert!((forward_delta_to_cardinal(-0.1) - 0.1).abs() < 0.0001);
        assert!((forward_delta_to_cardinal(PI + 0.2) - (FRAC_PI_2 - 0.2)).abs() < 0.0001);
        // Large accumulated angles still land on a cardinal
        let angle = 40.0 * TAU + 1.0;
        let target = normalize_angle(angle + forward_delta_to_cardinal(angle));
        assert!(CARDINAL_ANGLES
            .iter()
            .any(|c| (normalize_angle(target - c)).abs() < 0.001));
    }
}
