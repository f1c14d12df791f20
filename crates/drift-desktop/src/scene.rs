//! One frame of the drift animation, from timestamp to pixels

use crate::clock::FrameClock;
use crate::config::DriftConfig;
use crate::drift::{DriftController, DriftEvent};
use crate::error::DriftResult;
use crate::math::Size;
use crate::orbit::Pose;
use crate::render::{DriftRenderer, DriftSurface};

/// What happened during a frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Clamped frame delta (s)
    pub delta: f32,
    pub pose: Option<Pose>,
    pub events: Vec<DriftEvent>,
}

/// Clock, controller and renderer wired together
pub struct DriftScene {
    clock: FrameClock,
    controller: DriftController,
    renderer: DriftRenderer,
}

impl DriftScene {
    pub fn new(config: DriftConfig, canvas: Size, now_ms: f64) -> DriftResult<Self> {
        let controller = DriftController::new(config, canvas, now_ms)?;
        Ok(Self::from_controller(controller))
    }

    pub fn from_controller(controller: DriftController) -> Self {
        Self {
            clock: FrameClock::new(controller.config().max_frame_delta),
            controller,
            renderer: DriftRenderer::new(),
        }
    }

    pub fn controller(&self) -> &DriftController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DriftController {
        &mut self.controller
    }

    /// Step and draw one frame at `now_ms`
    pub fn frame<S: DriftSurface>(&mut self, now_ms: f64, surface: &mut S) -> FrameReport {
        let delta = self.clock.tick(now_ms);
        let pose = self.controller.advance(now_ms, delta);
        self.renderer.render(surface, &self.controller, pose);
        FrameReport {
            delta,
            pose,
            events: self.controller.drain_events(),
        }
    }
}
