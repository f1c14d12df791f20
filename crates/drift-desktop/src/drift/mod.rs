//! Drift state machine
//!
//! Owns the phase, the orbit, the trails and the on/off request flags.
//!
//! ```text
//! hidden ─▶ entering_line ─▶ entering_corner_arc ─▶ orbiting
//!   ▲                                                  │
//!   └──── exiting_line ◀──── orbit_to_exit_tangent ◀───┘
//! ```
//!
//! Phase timing runs on a simulation clock built from clamped frame deltas,
//! so a long pause (backgrounded tab) never skips phases. Pointer idle time
//! uses real timestamps.
//!
//! A disable request never cuts a run short: during entry it is parked in
//! `drift_pending_disable` and honored once `orbiting` is reached.

mod phase;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::DriftConfig;
use crate::error::DriftResult;
use crate::math::{Size, Vec2, MIN_DIVISOR};
use crate::orbit::{Orbit, Pose, TireAnchors, ORBIT_SLIP};
use crate::planner::{exit_target, plan_exit, EntryRoute};
use crate::trail::TireTrails;
use crate::transition::{lerp, smoothstep};

pub use phase::{DriftEvent, DriftPhase, PhaseKind};

/// Controller for the pointer-following drift animation
pub struct DriftController {
    config: DriftConfig,
    anchors: TireAnchors,
    rng: SmallRng,

    canvas: Size,
    pointer: Vec2,
    last_pointer_move_ms: f64,

    orbit: Orbit,
    phase: DriftPhase,
    /// Unwrapped orbit angle; only reset when a new entry begins
    drift_angle: f32,
    /// Seconds of driving since the current entry, feeds the speed wave
    drift_time: f32,
    /// Accumulated clamped frame time (s)
    sim_time: f64,

    drift_requested: bool,
    drift_enabled: bool,
    drift_pending_disable: bool,

    trails: TireTrails,
    pose: Option<Pose>,
    events: Vec<DriftEvent>,
}

impl DriftController {
    /// Create a controller seeded from OS entropy
    pub fn new(config: DriftConfig, canvas: Size, now_ms: f64) -> DriftResult<Self> {
        Self::with_rng(config, canvas, now_ms, SmallRng::from_entropy())
    }

    /// Create a controller with a fixed seed
    pub fn with_seed(config: DriftConfig, canvas: Size, now_ms: f64, seed: u64) -> DriftResult<Self> {
        Self::with_rng(config, canvas, now_ms, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: DriftConfig, canvas: Size, now_ms: f64, rng: SmallRng) -> DriftResult<Self> {
        config.validate()?;
        let pointer = canvas.center();
        Ok(Self {
            anchors: TireAnchors::from_config(&config),
            trails: TireTrails::new(config.trail_length),
            orbit: Orbit::new(pointer, config.orbit_radius),
            config,
            rng,
            canvas,
            pointer,
            last_pointer_move_ms: now_ms,
            phase: DriftPhase::Hidden,
            drift_angle: 0.0,
            drift_time: 0.0,
            sim_time: 0.0,
            drift_requested: false,
            drift_enabled: false,
            drift_pending_disable: false,
            pose: None,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn phase(&self) -> &DriftPhase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn drift_angle(&self) -> f32 {
        self.drift_angle
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn trails(&self) -> &TireTrails {
        &self.trails
    }

    /// Pose computed by the latest frame, if the sprite is on screen
    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// The user's desired on/off state
    pub fn is_requested(&self) -> bool {
        self.drift_requested
    }

    /// Whether drift is consuming frames (from engage until the final exit)
    pub fn is_enabled(&self) -> bool {
        self.drift_enabled
    }

    /// Whether a disable is waiting for the next safe phase boundary
    pub fn is_pending_disable(&self) -> bool {
        self.drift_pending_disable
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<DriftEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Canvas was resized to the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() {
            self.canvas = Size::new(width.max(0.0), height.max(0.0));
        }
    }

    /// Pointer moved to `position`
    pub fn pointer_moved(&mut self, position: Vec2, now_ms: f64) {
        self.record_pointer(position, now_ms);
        self.check_pointer_left();
    }

    /// Pointer became active (press / touch start) at `position`
    pub fn pointer_down(&mut self, position: Vec2, now_ms: f64) {
        self.record_pointer(position, now_ms);
        self.check_pointer_left();
    }

    /// Request drift on or off. Idempotent.
    pub fn set_drift_mode(&mut self, enabled: bool) {
        if enabled {
            self.drift_requested = true;
            // A re-enable during an exit lets the exit finish, then re-arms
            self.drift_pending_disable = false;
            if !self.drift_enabled {
                self.drift_enabled = true;
                info!("drift engaged");
                self.events.push(DriftEvent::Engaged);
            }
            return;
        }

        self.drift_requested = false;
        if !self.drift_enabled {
            return;
        }
        match self.phase {
            DriftPhase::Hidden => self.finalize(),
            DriftPhase::Orbiting => {
                self.drift_pending_disable = true;
                self.begin_exit_approach();
            }
            _ => {
                debug!(phase = %self.phase.kind(), "disable deferred");
                self.drift_pending_disable = true;
            }
        }
    }

    // =========================================================================
    // Frame step
    // =========================================================================

    /// Advance one frame and return the sprite pose, if it is on screen.
    ///
    /// `delta` is the elapsed time in seconds; it is clamped to the
    /// configured maximum.
    pub fn advance(&mut self, now_ms: f64, delta: f32) -> Option<Pose> {
        let dt = if delta.is_finite() {
            delta.clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        };

        if !self.drift_enabled {
            self.pose = None;
            return None;
        }

        self.sim_time += dt as f64;
        self.step_phase(now_ms, dt);

        let pose = if self.drift_enabled {
            self.current_pose()
        } else {
            None
        };
        if let Some(pose) = pose {
            let (left, right) = self.anchors.contact_points(&pose);
            self.trails
                .append(left, right, self.config.trail_initial_life);
        }
        self.trails.decay(dt, self.config.trail_decay);

        self.pose = pose;
        pose
    }

    fn step_phase(&mut self, now_ms: f64, dt: f32) {
        let now = self.sim_time;
        match self.phase {
            DriftPhase::Hidden => {
                if self.ready_for_entry(now_ms) {
                    self.begin_entry();
                }
            }
            DriftPhase::EnteringLine { line, arc_boost } => {
                if line.is_complete(now) {
                    let carried = line.overshoot(now);
                    self.set_phase(DriftPhase::EnteringCornerArc {
                        swept: 0.0,
                        arc_boost,
                    });
                    // Time past the end of the run continues on the arc
                    self.step_corner_arc(0.0, arc_boost, carried);
                }
            }
            DriftPhase::EnteringCornerArc { swept, arc_boost } => {
                self.step_corner_arc(swept, arc_boost, dt);
            }
            DriftPhase::Orbiting => {
                self.drift_angle += self.config.wave_angular_speed(self.drift_time) * dt;
                self.drift_time += dt;
                if self.drift_pending_disable {
                    self.begin_exit_approach();
                } else {
                    self.check_pointer_left();
                }
            }
            DriftPhase::OrbitToExitTangent {
                target,
                ramp_window,
                ..
            } => {
                let remaining = target - self.drift_angle;
                let ramp = smoothstep(1.0 - remaining / ramp_window.max(MIN_DIVISOR));
                let boost = lerp(1.0, self.config.exit_boost, ramp);
                self.drift_angle += self.config.wave_angular_speed(self.drift_time) * boost * dt;
                self.drift_time += dt;

                let remaining = target - self.drift_angle;
                if remaining <= 0.0 {
                    // Overshoot past the tangent is already distance down the exit run
                    let carried = -remaining * self.orbit.radius;
                    let line = plan_exit(&self.orbit, target, self.canvas, &self.config, now, carried);
                    self.set_phase(DriftPhase::ExitingLine { line });
                }
            }
            DriftPhase::ExitingLine { line } => {
                if line.is_complete(now) {
                    self.finish_exit();
                }
            }
        }
    }

    fn step_corner_arc(&mut self, swept: f32, arc_boost: f32, dt: f32) {
        let sweep = self.config.entry_sweep;
        let speed = self.config.wave_angular_speed(self.drift_time)
            * lerp(arc_boost, 1.0, smoothstep(swept / sweep));
        let step = speed * dt;
        self.drift_angle += step;
        self.drift_time += dt;

        let swept = swept + step;
        if swept >= sweep {
            // Overshoot is kept as the current angle
            self.set_phase(DriftPhase::Orbiting);
        } else {
            self.phase = DriftPhase::EnteringCornerArc { swept, arc_boost };
        }
    }

    fn current_pose(&self) -> Option<Pose> {
        let offset = self.config.sprite_forward_offset;
        match self.phase {
            DriftPhase::Hidden => None,
            DriftPhase::EnteringLine { line, .. } | DriftPhase::ExitingLine { line } => {
                Some(Pose::new(line.position(self.sim_time), line.heading(), 0.0, offset))
            }
            DriftPhase::EnteringCornerArc { swept, .. } => {
                let slip = ORBIT_SLIP * smoothstep(swept / self.config.entry_sweep);
                Some(self.orbit.pose(self.drift_angle, slip, offset))
            }
            DriftPhase::Orbiting => Some(self.orbit.pose(self.drift_angle, ORBIT_SLIP, offset)),
            DriftPhase::OrbitToExitTangent {
                target,
                blend_window,
                ..
            } => {
                let remaining = (target - self.drift_angle).max(0.0);
                let slip = ORBIT_SLIP * smoothstep(remaining / blend_window.max(MIN_DIVISOR));
                Some(self.orbit.pose(self.drift_angle, slip, offset))
            }
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn ready_for_entry(&self, now_ms: f64) -> bool {
        self.drift_enabled
            && self.drift_requested
            && !self.drift_pending_disable
            && now_ms - self.last_pointer_move_ms >= self.config.reentry_idle_ms
    }

    fn begin_entry(&mut self) {
        let center = self.orbit_center();
        self.orbit = Orbit::new(center, self.config.orbit_radius);
        self.trails.clear();
        self.drift_time = 0.0;

        let route = EntryRoute::plan(&self.orbit, self.canvas, &self.config, self.sim_time, &mut self.rng);
        // Fresh angle each run keeps the accumulator small
        self.drift_angle = route.tangent_angle;
        debug!(edge = ?route.edge, duration = route.line.duration, "entry planned");
        self.set_phase(DriftPhase::EnteringLine {
            arc_boost: route.arc_boost(&self.config),
            line: route.line,
        });
    }

    fn begin_exit_approach(&mut self) {
        let target = exit_target(self.drift_angle);
        let remaining = target - self.drift_angle;
        // Windows never exceed the distance left, so speed and slip start
        // from their orbiting values
        self.set_phase(DriftPhase::OrbitToExitTangent {
            target,
            ramp_window: self.config.pre_exit_sweep.min(remaining),
            blend_window: self.config.exit_slip_blend.min(remaining),
        });
    }

    fn finish_exit(&mut self) {
        if self.drift_requested && !self.drift_pending_disable {
            self.set_phase(DriftPhase::Hidden);
        } else {
            self.finalize();
        }
    }

    /// Fully switch drift off
    fn finalize(&mut self) {
        if !matches!(self.phase, DriftPhase::Hidden) {
            self.set_phase(DriftPhase::Hidden);
        }
        self.drift_enabled = false;
        self.drift_pending_disable = false;
        self.trails.clear();
        self.pose = None;
        info!("drift finalized");
        self.events.push(DriftEvent::Finalized);
    }

    fn set_phase(&mut self, next: DriftPhase) {
        let from = self.phase.kind();
        let to = next.kind();
        self.phase = next;
        if from != to {
            debug!(%from, %to, angle = self.drift_angle, "drift phase");
            self.events.push(DriftEvent::PhaseChanged { from, to });
        }
    }

    // =========================================================================
    // Pointer helpers
    // =========================================================================

    fn record_pointer(&mut self, position: Vec2, now_ms: f64) {
        if position.is_finite() {
            self.pointer = position;
        } else {
            warn!(?position, "ignoring non-finite pointer position");
        }
        self.last_pointer_move_ms = now_ms;
    }

    /// Start the exit when the pointer wanders off the orbit
    fn check_pointer_left(&mut self) {
        if matches!(self.phase, DriftPhase::Orbiting)
            && !self.drift_pending_disable
            && !self.orbit.contains(self.pointer, self.config.exit_padding)
        {
            debug!("pointer left the orbit");
            self.begin_exit_approach();
        }
    }

    /// Pointer position, falling back to the canvas center if unusable
    fn orbit_center(&self) -> Vec2 {
        if self.pointer.is_finite() {
            return self.pointer;
        }
        warn!("pointer not finite, orbiting the canvas center");
        let center = self.canvas.center();
        if center.is_finite() {
            center
        } else {
            Vec2::ZERO
        }
    }
}
