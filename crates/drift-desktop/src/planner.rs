//! Entry and exit route planning
//!
//! Every run touches the orbit at one of the four cardinal tangent points.
//! The tangent at angle θ is travelled along θ + π/2, so each cardinal angle
//! points at exactly one canvas edge:
//!
//! | tangent | travel | exit edge | entry edge |
//! |---------|--------|-----------|------------|
//! | -π/2    | +x     | right     | left       |
//! | 0       | +y     | bottom    | top        |
//! | π/2     | -x     | left      | right      |
//! | π       | -y     | top       | bottom     |

use rand::Rng;

use crate::config::{DriftConfig, ARC_BOOST_MIN};
use crate::math::{
    forward_delta_to_cardinal, normalize_angle, travel_heading, Size, Vec2, CARDINAL_ANGLES,
    MIN_DIVISOR,
};
use crate::orbit::Orbit;
use crate::transition::LineMotion;

/// A canvas edge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Pick an edge uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn opposite(self) -> Self {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Tangent angle whose travel line runs out through this edge
    pub fn exit_tangent(self) -> f32 {
        match self {
            Edge::Right => CARDINAL_ANGLES[0],
            Edge::Bottom => CARDINAL_ANGLES[1],
            Edge::Left => CARDINAL_ANGLES[2],
            Edge::Top => CARDINAL_ANGLES[3],
        }
    }

    /// Tangent angle reached by a run coming in from this edge
    pub fn entry_tangent(self) -> f32 {
        self.opposite().exit_tangent()
    }

    /// Edge an exit leaves through when it departs from the cardinal
    /// tangent nearest to `angle`
    pub fn for_exit_tangent(angle: f32) -> Self {
        let angle = normalize_angle(angle);
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                let da = normalize_angle(angle - a.exit_tangent()).abs();
                let db = normalize_angle(angle - b.exit_tangent()).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(Edge::Right)
    }

    /// Distance along the travel line from `point` to `margin` past this edge.
    ///
    /// Never shorter than `margin`, even when `point` already lies outside.
    fn run_length(self, point: Vec2, canvas: Size, margin: f32) -> f32 {
        let raw = match self {
            Edge::Left => point.x + margin,
            Edge::Right => canvas.width + margin - point.x,
            Edge::Top => point.y + margin,
            Edge::Bottom => canvas.height + margin - point.y,
        };
        raw.max(margin)
    }
}

/// Planned entry: a straight accelerating run onto the orbit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryRoute {
    pub edge: Edge,
    pub tangent_angle: f32,
    pub line: LineMotion,
}

impl EntryRoute {
    /// Plan a run from a random edge onto `orbit`, starting at `now`
    pub fn plan<R: Rng>(
        orbit: &Orbit,
        canvas: Size,
        config: &DriftConfig,
        now: f64,
        rng: &mut R,
    ) -> Self {
        Self::from_edge(Edge::random(rng), orbit, canvas, config, now)
    }

    /// Plan a run from a specific edge
    pub fn from_edge(
        edge: Edge,
        orbit: &Orbit,
        canvas: Size,
        config: &DriftConfig,
        now: f64,
    ) -> Self {
        let tangent_angle = edge.entry_tangent();
        let to = orbit.point_at(tangent_angle);
        let direction = Vec2::from_heading(travel_heading(tangent_angle));
        let run = edge.run_length(to, canvas, config.edge_margin());
        let from = to - direction * run;

        let duration = config.phase_duration(run.max(MIN_DIVISOR), config.entry_speed);
        Self {
            edge,
            tangent_angle,
            line: LineMotion::new(from, to, now, duration, config.entry_accel_exponent),
        }
    }

    /// Angular speed multiplier for the corner arc so the arc picks up
    /// the run's arrival speed
    pub fn arc_boost(&self, config: &DriftConfig) -> f32 {
        corner_arc_boost(self.line.end_speed(), config)
    }
}

/// Boost matching `end_speed` against the nominal orbit speed
pub fn corner_arc_boost(end_speed: f32, config: &DriftConfig) -> f32 {
    let ratio = end_speed / config.nominal_orbit_speed().max(MIN_DIVISOR);
    ratio.clamp(ARC_BOOST_MIN, config.arc_boost_max.max(ARC_BOOST_MIN))
}

/// The cardinal tangent the orbit reaches next when moving forward from `angle`.
///
/// Returned unwrapped, so it is always strictly ahead of `angle`.
pub fn exit_target(angle: f32) -> f32 {
    angle + forward_delta_to_cardinal(angle)
}

/// Plan the run from the tangent at `target_angle` out past the matching edge.
///
/// `carried` pixels of the run count as already travelled at `now`.
pub fn plan_exit(
    orbit: &Orbit,
    target_angle: f32,
    canvas: Size,
    config: &DriftConfig,
    now: f64,
    carried: f32,
) -> LineMotion {
    let edge = Edge::for_exit_tangent(target_angle);
    let tangent = edge.exit_tangent();
    let from = orbit.point_at(tangent);
    let direction = Vec2::from_heading(travel_heading(tangent));
    let run = edge.run_length(from, canvas, config.edge_margin());
    let to = from + direction * run;

    let duration = config.phase_duration(run.max(MIN_DIVISOR), config.exit_speed);
    LineMotion::new(from, to, now, duration, config.exit_accel_exponent)
        .with_carried_distance(carried.max(0.0), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn setup() -> (Orbit, Size, DriftConfig) {
        (
            Orbit::new(Vec2::new(600.0, 400.0), 80.0),
            Size::new(1200.0, 800.0),
            DriftConfig::default(),
        )
    }

    #[test]
    fn test_exit_tangent_table() {
        assert!((Edge::Right.exit_tangent() + FRAC_PI_2).abs() < 1e-6);
        assert!(Edge::Bottom.exit_tangent().abs() < 1e-6);
        assert!((Edge::Left.exit_tangent() - FRAC_PI_2).abs() < 1e-6);
        assert!((Edge::Top.exit_tangent() - PI).abs() < 1e-6);
    }

    #[test]
    fn test_for_exit_tangent_roundtrip() {
        for edge in Edge::ALL {
            assert_eq!(Edge::for_exit_tangent(edge.exit_tangent()), edge);
            assert_eq!(Edge::for_exit_tangent(edge.exit_tangent() + 3.0 * TAU), edge);
        }
    }

    #[test]
    fn test_entry_starts_offscreen_and_ends_on_tangent() {
        let (orbit, canvas, config) = setup();
        let margin = config.edge_margin();
        for edge in Edge::ALL {
            let route = EntryRoute::from_edge(edge, &orbit, canvas, &config, 0.0);
            let from = route.line.from;
            match edge {
                Edge::Left => assert!((from.x + margin).abs() < 0.01),
                Edge::Right => assert!((from.x - (canvas.width + margin)).abs() < 0.01),
                Edge::Top => assert!((from.y + margin).abs() < 0.01),
                Edge::Bottom => assert!((from.y - (canvas.height + margin)).abs() < 0.01),
            }
            let tangent_point = orbit.point_at(route.tangent_angle);
            assert!(route.line.to.distance(tangent_point) < 0.01);
        }
    }

    #[test]
    fn test_entry_run_arrives_along_orbit_tangent() {
        let (orbit, canvas, config) = setup();
        for edge in Edge::ALL {
            let route = EntryRoute::from_edge(edge, &orbit, canvas, &config, 0.0);
            let diff = normalize_angle(route.line.heading() - travel_heading(route.tangent_angle));
            assert!(diff.abs() < 0.001, "{:?} entry heading mismatch", edge);
        }
    }

    #[test]
    fn test_entry_duration_clamped() {
        let (orbit, canvas, config) = setup();
        let route = EntryRoute::from_edge(Edge::Left, &orbit, canvas, &config, 2.0);
        assert!(route.line.duration >= config.min_phase_duration);
        assert!(route.line.duration <= config.max_phase_duration);
        assert!((route.line.start_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_entry_when_pointer_outside_canvas() {
        let (_, canvas, config) = setup();
        let orbit = Orbit::new(Vec2::new(-300.0, 400.0), 80.0);
        let route = EntryRoute::from_edge(Edge::Left, &orbit, canvas, &config, 0.0);
        // Still arrives moving forward along the tangent
        assert!(route.line.length() >= config.edge_margin() - 0.01);
        let diff = normalize_angle(route.line.heading() - travel_heading(route.tangent_angle));
        assert!(diff.abs() < 0.001);
    }

    #[test]
    fn test_edge_selection_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut counts: HashMap<Edge, u32> = HashMap::new();
        let trials = 20_000;
        for _ in 0..trials {
            *counts.entry(Edge::random(&mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        for edge in Edge::ALL {
            let share = counts[&edge] as f32 / trials as f32;
            assert!((share - 0.25).abs() < 0.02, "{:?} share {}", edge, share);
        }
    }

    #[test]
    fn test_arc_boost_bounds() {
        let config = DriftConfig::default();
        assert!((corner_arc_boost(0.0, &config) - 1.0).abs() < 1e-6);
        assert!((corner_arc_boost(1e9, &config) - config.arc_boost_max).abs() < 1e-6);
        let nominal = config.nominal_orbit_speed();
        assert!((corner_arc_boost(nominal * 1.5, &config) - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_exit_target_moves_forward() {
        for &angle in &[0.1f32, -0.1, 2.0, -2.9, 15.0, 100.5] {
            let target = exit_target(angle);
            assert!(target > angle);
            assert!(target - angle <= FRAC_PI_2 + 1e-6);
            let n = normalize_angle(target);
            assert!(CARDINAL_ANGLES
                .iter()
                .any(|c| normalize_angle(n - c).abs() < 0.001));
        }
    }

    #[test]
    fn test_plan_exit_leaves_through_matching_edge() {
        let (orbit, canvas, config) = setup();
        let margin = config.edge_margin();
        let line = plan_exit(&orbit, -FRAC_PI_2 + TAU, canvas, &config, 0.0, 0.0);
        assert!((line.to.x - (canvas.width + margin)).abs() < 0.01);
        assert!(line.from.distance(orbit.point_at(-FRAC_PI_2)) < 0.01);

        let line = plan_exit(&orbit, PI, canvas, &config, 0.0, 0.0);
        assert!((line.to.y + margin).abs() < 0.01);
    }

    #[test]
    fn test_plan_exit_carries_distance() {
        let (orbit, canvas, config) = setup();
        let line = plan_exit(&orbit, 0.0, canvas, &config, 5.0, 12.0);
        let covered = line.position(5.0).distance(line.from);
        assert!((covered - 12.0).abs() < 0.05, "covered {}", covered);
        assert!(line.start_time < 5.0);
    }
}
