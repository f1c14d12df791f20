/// Turns host frame timestamps into clamped frame deltas
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame_at: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    /// Create a clock whose deltas never exceed `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_frame_at: None,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Record a frame at `now_ms` and return the seconds since the previous one.
    ///
    /// The first frame, and any frame with a timestamp going backwards,
    /// yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_frame_at {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_frame_at = Some(now_ms);
        }
        delta.clamp(0.0, self.max_delta)
    }
}
