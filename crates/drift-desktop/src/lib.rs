//! Drift animation for the desktop landing page
//!
//! A small car sprite drives in from a random canvas edge, drifts in circles
//! around the resting pointer leaving fading tire marks, and drives off again
//! when the pointer moves away or drift mode is switched off.
//!
//! ## Architecture
//!
//! - [`math`]: Geometry (`Vec2`, `Size`, cardinal angles)
//! - [`transition`]: Easing curves and accelerating line runs
//! - [`trail`]: Bounded, decaying tire trails
//! - [`orbit`]: Orbit circle, sprite pose and tire anchors
//! - [`planner`]: Entry and exit routes between canvas edges and the orbit
//! - [`drift`]: The phase state machine ([`DriftController`])
//! - [`render`]: Drawing against any [`DriftSurface`]
//! - [`typing`]: The typed-word headline effect
//!
//! ## Example
//!
//! ```rust
//! use drift_desktop::{DriftConfig, DriftController, PhaseKind, Size};
//!
//! let mut drift = DriftController::with_seed(
//!     DriftConfig::default(),
//!     Size::new(1280.0, 720.0),
//!     0.0,
//!     7,
//! )
//! .unwrap();
//!
//! drift.set_drift_mode(true);
//! // The pointer has been idle long enough, so the entry run starts
//! drift.advance(2000.0, 0.016);
//! assert_eq!(drift.phase_kind(), PhaseKind::EnteringLine);
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state and math is plain Rust, testable without a browser
//! 2. **Host Time**: Every step takes the host timestamp, so tests are deterministic
//! 3. **Browser Binding Behind a Feature**: Canvas drawing lives in the `wasm` feature

pub mod config;
pub mod drift;
pub mod error;
pub mod math;
pub mod orbit;
pub mod planner;
pub mod render;
pub mod trail;
pub mod transition;
pub mod typing;

mod clock;
mod scene;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

pub use clock::FrameClock;
pub use config::DriftConfig;
pub use drift::{DriftController, DriftEvent, DriftPhase, PhaseKind};
pub use error::{DriftError, DriftResult};
pub use math::{Size, Vec2};
pub use orbit::{Orbit, Pose, TireAnchors};
pub use planner::{Edge, EntryRoute};
pub use render::{DriftRenderer, DriftSurface};
pub use scene::{DriftScene, FrameReport};
pub use trail::{TireTrails, TrailBuffer, TrailSegment};
pub use typing::TypingText;
