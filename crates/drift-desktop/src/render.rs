//! Frame rendering against an abstract 2D surface
//!
//! The browser binding implements [`DriftSurface`] over a canvas 2D context;
//! tests implement it with a recorder.

use crate::drift::DriftController;
use crate::math::{Size, Vec2};
use crate::orbit::Pose;
use crate::trail::TrailBuffer;

/// Trail stroke color (RGB); alpha comes from the segment
pub const TRAIL_COLOR: (u8, u8, u8) = (88, 95, 103);

/// Fill color of the stand-in rectangle shown before the sprite loads
pub const PLACEHOLDER_COLOR: &str = "#11161b";

/// Stand-in rectangle size in CSS pixels
pub const PLACEHOLDER_SIZE: Size = Size::new(24.0, 14.0);

/// Drawing operations the renderer needs
pub trait DriftSurface {
    /// Clear the whole surface
    fn clear(&mut self, size: Size);

    /// Stroke one trail segment in [`TRAIL_COLOR`] with round caps
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32);

    /// Whether the sprite image has finished loading
    fn sprite_ready(&self) -> bool;

    /// Draw the sprite centered on `pose.position`, rotated by `pose.rotation`
    fn draw_sprite(&mut self, pose: &Pose, size: f32);

    /// Draw the stand-in rectangle centered on the pose
    fn fill_placeholder(&mut self, pose: &Pose, size: Size);
}

/// Draws the controller state each frame
#[derive(Debug, Default)]
pub struct DriftRenderer {
    last_pose: Option<Pose>,
}

impl DriftRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pose actually drawn
    pub fn last_pose(&self) -> Option<Pose> {
        self.last_pose
    }

    /// Render one frame: clear, trails, then the sprite at `pose`
    pub fn render<S: DriftSurface>(
        &mut self,
        surface: &mut S,
        controller: &DriftController,
        pose: Option<Pose>,
    ) {
        surface.clear(controller.canvas());
        if !controller.is_enabled() {
            return;
        }

        let config = controller.config();
        let trails = controller.trails();
        draw_trail(surface, &trails.left, config.trail_width, config.trail_opacity);
        draw_trail(surface, &trails.right, config.trail_width, config.trail_opacity);

        let Some(pose) = pose else {
            return;
        };
        if surface.sprite_ready() {
            surface.draw_sprite(&pose, config.car_size);
        } else {
            surface.fill_placeholder(&pose, PLACEHOLDER_SIZE);
        }
        self.last_pose = Some(pose);
    }
}

fn draw_trail<S: DriftSurface>(surface: &mut S, trail: &TrailBuffer, width: f32, opacity: f32) {
    for segment in trail.segments(opacity) {
        surface.stroke_segment(segment.from, segment.to, width, segment.alpha);
    }
}
