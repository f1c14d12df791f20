//! Drift phases
//!
//! Each non-hidden phase carries only the parameters that mean something
//! while it is active, so leaving a phase discards them.

use crate::transition::LineMotion;

/// Active phase of the drift animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriftPhase {
    /// Nothing on screen; waiting for the pointer to settle
    Hidden,
    /// Accelerating straight run from offscreen onto the orbit tangent
    EnteringLine {
        line: LineMotion,
        /// Corner-arc speed multiplier matched to the run's arrival speed
        arc_boost: f32,
    },
    /// Fixed sweep around the orbit while slip builds up
    EnteringCornerArc {
        /// Angle covered so far (rad)
        swept: f32,
        arc_boost: f32,
    },
    /// Steady drifting around the orbit center
    Orbiting,
    /// Still orbiting, lining up with the exit tangent
    OrbitToExitTangent {
        /// Unwrapped angle of the exit tangent
        target: f32,
        /// Window over which the speed ramps toward the exit boost (rad)
        ramp_window: f32,
        /// Window over which slip blends back to zero (rad)
        blend_window: f32,
    },
    /// Accelerating straight run from the tangent to offscreen
    ExitingLine { line: LineMotion },
}

impl DriftPhase {
    /// Data-less discriminant of this phase
    pub fn kind(&self) -> PhaseKind {
        match self {
            DriftPhase::Hidden => PhaseKind::Hidden,
            DriftPhase::EnteringLine { .. } => PhaseKind::EnteringLine,
            DriftPhase::EnteringCornerArc { .. } => PhaseKind::EnteringCornerArc,
            DriftPhase::Orbiting => PhaseKind::Orbiting,
            DriftPhase::OrbitToExitTangent { .. } => PhaseKind::OrbitToExitTangent,
            DriftPhase::ExitingLine { .. } => PhaseKind::ExitingLine,
        }
    }
}

/// Phase discriminant for observers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Hidden,
    EnteringLine,
    EnteringCornerArc,
    Orbiting,
    OrbitToExitTangent,
    ExitingLine,
}

impl PhaseKind {
    /// Get the string ID for this phase
    pub fn id(&self) -> &'static str {
        match self {
            PhaseKind::Hidden => "hidden",
            PhaseKind::EnteringLine => "entering_line",
            PhaseKind::EnteringCornerArc => "entering_corner_arc",
            PhaseKind::Orbiting => "orbiting",
            PhaseKind::OrbitToExitTangent => "orbit_to_exit_tangent",
            PhaseKind::ExitingLine => "exiting_line",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Something the host page should react to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftEvent {
    /// Drift mode switched on; the particle field should stop reacting to the pointer
    Engaged,
    /// The phase changed between two frames
    PhaseChanged { from: PhaseKind, to: PhaseKind },
    /// Drift fully wound down; the particle field may react to the pointer again
    Finalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ids() {
        assert_eq!(PhaseKind::Hidden.id(), "hidden");
        assert_eq!(PhaseKind::EnteringLine.id(), "entering_line");
        assert_eq!(PhaseKind::EnteringCornerArc.id(), "entering_corner_arc");
        assert_eq!(PhaseKind::Orbiting.id(), "orbiting");
        assert_eq!(PhaseKind::OrbitToExitTangent.id(), "orbit_to_exit_tangent");
        assert_eq!(PhaseKind::ExitingLine.id(), "exiting_line");
        assert_eq!(PhaseKind::Orbiting.to_string(), "orbiting");
    }

    #[test]
    fn test_phase_kind() {
        assert_eq!(DriftPhase::Hidden.kind(), PhaseKind::Hidden);
        assert_eq!(DriftPhase::Orbiting.kind(), PhaseKind::Orbiting);
        let arc = DriftPhase::EnteringCornerArc {
            swept: 0.0,
            arc_boost: 1.0,
        };
        assert_eq!(arc.kind(), PhaseKind::EnteringCornerArc);
    }
}
