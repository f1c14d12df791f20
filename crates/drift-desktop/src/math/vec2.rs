/// 2D vector for canvas positions and offsets (CSS pixels, y down)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `heading` (radians, canvas rotation convention)
    pub fn from_heading(heading: f32) -> Self {
        let (sin, cos) = heading.sin_cos();
        Self::new(cos, sin)
    }

    /// Distance to another point
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length of the vector
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Direction of the vector as a canvas heading
    pub fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Linear interpolation towards `other`
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Rotate a local offset by `rotation` and translate it to this point
    pub fn offset_rotated(self, local: Vec2, rotation: f32) -> Vec2 {
        let (sin, cos) = rotation.sin_cos();
        Vec2::new(
            self.x + local.x * cos - local.y * sin,
            self.y + local.x * sin + local.y * cos,
        )
    }

    /// Both components are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

/// Canvas size in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point of a canvas of this size
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 0.001);
        assert!((b.distance(a) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_from_heading() {
        let right = Vec2::from_heading(0.0);
        assert!((right.x - 1.0).abs() < 0.001);
        assert!(right.y.abs() < 0.001);

        // y grows downwards on the canvas
        let down = Vec2::from_heading(FRAC_PI_2);
        assert!(down.x.abs() < 0.001);
        assert!((down.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_offset_rotated() {
        let origin = Vec2::new(10.0, 10.0);
        let p = origin.offset_rotated(Vec2::new(5.0, 0.0), FRAC_PI_2);
        assert!((p.x - 10.0).abs() < 0.001);
        assert!((p.y - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(-4.0, 2.0);
        let b = Vec2::new(6.0, -8.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 1.0).abs() < 0.001);
        assert!((mid.y + 3.0).abs() < 0.001);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vec2::new(1.0, 2.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 2.0).is_finite());
        assert!(!Vec2::new(1.0, f32::INFINITY).is_finite());
    }
}
