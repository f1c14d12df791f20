//! Static tuning knobs for the drift animation
//!
//! The host may hand in a partial JSON object; anything missing keeps its
//! default. Nothing here is mutated once a controller has been built.

use std::f32::consts::PI;

use serde::Deserialize;

use crate::error::{DriftError, DriftResult};
use crate::math::MIN_DIVISOR;

/// Weight of the second speed-wave harmonic relative to the first
pub const SPEED_WAVE_HARMONIC: f32 = 0.4;

/// Lower bound of the corner-arc speed boost
pub const ARC_BOOST_MIN: f32 = 1.0;

/// Drift animation configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Orbit radius around the pointer (px)
    pub orbit_radius: f32,
    /// Extra distance past the radius before the pointer counts as "left" (px)
    pub exit_padding: f32,

    /// Nominal orbit angular speed (rad/s)
    pub base_angular_speed: f32,
    /// Amplitude of the angular speed wave (rad/s)
    pub speed_wave_amplitude: f32,
    /// Frequency of the angular speed wave (rad per second of drift time)
    pub speed_wave_frequency: f32,

    /// Linear speed used to size the entry run (px/s)
    pub entry_speed: f32,
    /// Linear speed used to size the exit run (px/s)
    pub exit_speed: f32,
    /// Shortest allowed entry/exit run (s)
    pub min_phase_duration: f32,
    /// Longest allowed entry/exit run (s)
    pub max_phase_duration: f32,
    /// Power-law exponent of the entry run
    pub entry_accel_exponent: f32,
    /// Power-law exponent of the exit run
    pub exit_accel_exponent: f32,

    /// Angle swept by the corner arc after the entry run (rad)
    pub entry_sweep: f32,
    /// Upper bound of the corner-arc speed boost
    pub arc_boost_max: f32,
    /// Window before the exit tangent in which the orbit speeds up (rad)
    pub pre_exit_sweep: f32,
    /// Angular speed multiplier reached at the exit tangent
    pub exit_boost: f32,
    /// Window before the exit tangent in which slip blends back to zero (rad)
    pub exit_slip_blend: f32,

    /// Offscreen margin as a multiple of the sprite size
    pub edge_margin_factor: f32,
    /// Minimum offscreen margin (px)
    pub edge_margin_min: f32,

    /// Trail stroke width (px)
    pub trail_width: f32,
    /// Trail life decay rate
    pub trail_decay: f32,
    /// Maximum points kept per tire trail
    pub trail_length: usize,
    /// Life given to freshly stamped trail points
    pub trail_initial_life: f32,
    /// Global trail alpha multiplier
    pub trail_opacity: f32,

    /// Drawn sprite size (px)
    pub car_size: f32,
    /// Size of the source artwork the tire anchors are measured against (px)
    pub sprite_reference_size: f32,
    /// Rotation correcting the artwork's default facing (rad)
    pub sprite_forward_offset: f32,
    pub tire_rear_from_top_px: f32,
    pub tire_top_from_left_px: f32,
    pub tire_bottom_from_right_px: f32,

    /// Pointer idle time required before a new entry (ms)
    pub reentry_idle_ms: f64,
    /// Largest frame delta fed to the simulation (s)
    pub max_frame_delta: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 80.0,
            exit_padding: 14.0,
            base_angular_speed: 2.1,
            speed_wave_amplitude: 1.2,
            speed_wave_frequency: 0.6,
            entry_speed: 900.0,
            exit_speed: 900.0,
            min_phase_duration: 0.35,
            max_phase_duration: 1.6,
            entry_accel_exponent: 2.2,
            exit_accel_exponent: 2.2,
            entry_sweep: PI * 0.75,
            arc_boost_max: 2.4,
            pre_exit_sweep: 1.2,
            exit_boost: 2.4,
            exit_slip_blend: 0.9,
            edge_margin_factor: 1.4,
            edge_margin_min: 96.0,
            trail_width: 4.0,
            trail_decay: 1.2,
            trail_length: 140,
            trail_initial_life: 1.0,
            trail_opacity: 1.0,
            car_size: 64.0,
            sprite_reference_size: 256.0,
            sprite_forward_offset: 0.0,
            tire_rear_from_top_px: 65.0,
            tire_top_from_left_px: 65.0,
            tire_bottom_from_right_px: 60.0,
            reentry_idle_ms: 1200.0,
            max_frame_delta: 0.05,
        }
    }
}

impl DriftConfig {
    /// Parse a (possibly partial) JSON object and validate it
    pub fn from_json(json: &str) -> DriftResult<Self> {
        let config: DriftConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation cannot run with
    pub fn validate(&self) -> DriftResult<()> {
        fn positive(field: &'static str, value: f32) -> DriftResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DriftError::InvalidConfig {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        fn non_negative(value: f32) -> bool {
            value.is_finite() && value >= 0.0
        }

        let knobs = [
            ("orbit_radius", self.orbit_radius),
            ("exit_padding", self.exit_padding),
            ("base_angular_speed", self.base_angular_speed),
            ("speed_wave_amplitude", self.speed_wave_amplitude),
            ("speed_wave_frequency", self.speed_wave_frequency),
            ("entry_speed", self.entry_speed),
            ("exit_speed", self.exit_speed),
            ("min_phase_duration", self.min_phase_duration),
            ("max_phase_duration", self.max_phase_duration),
            ("entry_accel_exponent", self.entry_accel_exponent),
            ("exit_accel_exponent", self.exit_accel_exponent),
            ("entry_sweep", self.entry_sweep),
            ("arc_boost_max", self.arc_boost_max),
            ("pre_exit_sweep", self.pre_exit_sweep),
            ("exit_boost", self.exit_boost),
            ("exit_slip_blend", self.exit_slip_blend),
            ("edge_margin_factor", self.edge_margin_factor),
            ("edge_margin_min", self.edge_margin_min),
            ("trail_width", self.trail_width),
            ("trail_decay", self.trail_decay),
            ("trail_initial_life", self.trail_initial_life),
            ("trail_opacity", self.trail_opacity),
            ("car_size", self.car_size),
            ("sprite_reference_size", self.sprite_reference_size),
            ("sprite_forward_offset", self.sprite_forward_offset),
            ("tire_rear_from_top_px", self.tire_rear_from_top_px),
            ("tire_top_from_left_px", self.tire_top_from_left_px),
            ("tire_bottom_from_right_px", self.tire_bottom_from_right_px),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in knobs {
            if !value.is_finite() {
                return Err(DriftError::InvalidConfig {
                    field,
                    reason: "must be finite",
                });
            }
        }

        positive("orbit_radius", self.orbit_radius)?;
        positive("base_angular_speed", self.base_angular_speed)?;
        positive("entry_speed", self.entry_speed)?;
        positive("exit_speed", self.exit_speed)?;
        positive("min_phase_duration", self.min_phase_duration)?;
        positive("max_phase_duration", self.max_phase_duration)?;
        positive("entry_sweep", self.entry_sweep)?;
        positive("pre_exit_sweep", self.pre_exit_sweep)?;
        positive("exit_slip_blend", self.exit_slip_blend)?;
        positive("car_size", self.car_size)?;
        positive("sprite_reference_size", self.sprite_reference_size)?;
        positive("trail_initial_life", self.trail_initial_life)?;
        positive("max_frame_delta", self.max_frame_delta)?;

        if self.min_phase_duration > self.max_phase_duration {
            return Err(DriftError::InvalidConfig {
                field: "min_phase_duration",
                reason: "must not exceed max_phase_duration",
            });
        }
        if self.entry_accel_exponent < 1.0 {
            return Err(DriftError::InvalidConfig {
                field: "entry_accel_exponent",
                reason: "must be at least 1",
            });
        }
        if self.exit_accel_exponent < 1.0 {
            return Err(DriftError::InvalidConfig {
                field: "exit_accel_exponent",
                reason: "must be at least 1",
            });
        }
        if self.exit_boost < 1.0 {
            return Err(DriftError::InvalidConfig {
                field: "exit_boost",
                reason: "must be at least 1",
            });
        }
        if self.arc_boost_max < ARC_BOOST_MIN {
            return Err(DriftError::InvalidConfig {
                field: "arc_boost_max",
                reason: "must be at least 1",
            });
        }
        // The orbit must always move forward
        if self.slowest_angular_speed() <= 0.0 {
            return Err(DriftError::InvalidConfig {
                field: "speed_wave_amplitude",
                reason: "speed wave would stall or reverse the orbit",
            });
        }
        if self.trail_length == 0 {
            return Err(DriftError::InvalidConfig {
                field: "trail_length",
                reason: "must keep at least one point",
            });
        }
        if !non_negative(self.trail_decay) || !non_negative(self.trail_opacity) {
            return Err(DriftError::InvalidConfig {
                field: "trail_decay",
                reason: "trail decay and opacity must be non-negative",
            });
        }
        if !self.reentry_idle_ms.is_finite() || self.reentry_idle_ms < 0.0 {
            return Err(DriftError::InvalidConfig {
                field: "reentry_idle_ms",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// How far beyond the canvas edge the offscreen endpoints sit (px)
    pub fn edge_margin(&self) -> f32 {
        (self.edge_margin_factor * self.car_size).max(self.edge_margin_min)
    }

    /// Linear speed of the orbit at the nominal angular speed (px/s)
    pub fn nominal_orbit_speed(&self) -> f32 {
        self.base_angular_speed * self.orbit_radius
    }

    /// Lowest angular speed the speed wave can produce
    pub fn slowest_angular_speed(&self) -> f32 {
        self.base_angular_speed - self.speed_wave_amplitude.abs() * (1.0 + SPEED_WAVE_HARMONIC)
    }

    /// Angular speed of the orbit after `drift_time` seconds of driving
    pub fn wave_angular_speed(&self, drift_time: f32) -> f32 {
        let f = self.speed_wave_frequency;
        self.base_angular_speed
            + (drift_time * f).sin() * self.speed_wave_amplitude
            + (drift_time * f * 2.0).sin() * self.speed_wave_amplitude * SPEED_WAVE_HARMONIC
    }

    /// Run duration for `distance` pixels at `speed`, clamped to the phase bounds
    pub fn phase_duration(&self, distance: f32, speed: f32) -> f32 {
        (distance / speed.max(MIN_DIVISOR)).clamp(self.min_phase_duration, self.max_phase_duration)
    }
}
