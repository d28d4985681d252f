//! Section primitives: typed circuit segments traced into polyline points.
//!
//! Every section is traced independently of global state: an entry pose plus
//! a point spacing yields an ordered point run whose first element is the
//! entry position. The assembler derives the exit pose from the last two
//! emitted points; that is the only contract between sections.
use glam::Vec2;

/// Turn side of a cornering section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn sign(self) -> f32 {
        match self {
            Direction::Left => 1.0,
            Direction::Right => -1.0,
        }
    }
}

/// Entry state for tracing a section: a position and a heading angle in
/// radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

impl Pose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Unit direction vector of the heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /// Unit normal, 90 degrees counterclockwise from the heading.
    pub fn normal(&self) -> Vec2 {
        self.direction().perp()
    }
}

/// A typed circuit segment.
///
/// The sum type rules out invalid parameter combinations: a straight has no
/// radius to misconfigure, a corner no amplitude. `LongCorner` traces
/// exactly like `Corner` and exists so the planner can draw its parameters
/// from wider sweep and radius ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    Straight {
        length: f32,
    },
    Corner {
        angle_deg: f32,
        radius: f32,
        direction: Direction,
    },
    LongCorner {
        angle_deg: f32,
        radius: f32,
        direction: Direction,
    },
    /// Tight near-reversal turn. The sweep stays parameterized below 180
    /// degrees so the curvature remains drivable.
    Hairpin {
        angle_deg: f32,
        radius: f32,
        direction: Direction,
    },
    /// Straight run with one full sine period of lateral offset.
    Chicane {
        length: f32,
        amplitude: f32,
        direction: Direction,
    },
    /// Like a chicane with `turns` sine periods across the section.
    Esses {
        length: f32,
        amplitude: f32,
        turns: u32,
        direction: Direction,
    },
}

/// Arc step floor for corners; short arcs still get enough points for the
/// smoothing window to operate on.
const CORNER_MIN_STEPS: usize = 6;
/// Hairpins are tighter and need denser sampling.
const HAIRPIN_MIN_STEPS: usize = 8;

impl Section {
    /// Trace the section into points starting at `entry`, sampled roughly
    /// `spacing` units apart. The entry position is always the first point.
    pub fn trace(&self, entry: Pose, spacing: f32) -> Vec<Vec2> {
        match *self {
            Section::Straight { length } => trace_straight(entry, length, spacing),
            Section::Corner {
                angle_deg,
                radius,
                direction,
            }
            | Section::LongCorner {
                angle_deg,
                radius,
                direction,
            } => trace_arc(entry, angle_deg, radius, direction, spacing, CORNER_MIN_STEPS),
            Section::Hairpin {
                angle_deg,
                radius,
                direction,
            } => trace_arc(entry, angle_deg, radius, direction, spacing, HAIRPIN_MIN_STEPS),
            Section::Chicane {
                length,
                amplitude,
                direction,
            } => trace_sine(entry, length, amplitude, 1, direction, spacing),
            Section::Esses {
                length,
                amplitude,
                turns,
                direction,
            } => trace_sine(entry, length, amplitude, turns.max(1), direction, spacing),
        }
    }

    pub fn is_straight(&self) -> bool {
        matches!(self, Section::Straight { .. })
    }

    /// Cornering sections that should not be chained back to back with a
    /// hairpin.
    pub(crate) fn is_tight_turn(&self) -> bool {
        matches!(
            self,
            Section::Corner { .. } | Section::LongCorner { .. } | Section::Hairpin { .. }
        )
    }
}

fn trace_straight(entry: Pose, length: f32, spacing: f32) -> Vec<Vec2> {
    let steps = ((length / spacing).floor() as usize).max(1);
    let direction = entry.direction();
    (0..=steps)
        .map(|i| entry.position + direction * (i as f32 * spacing))
        .collect()
}

fn trace_arc(
    entry: Pose,
    angle_deg: f32,
    radius: f32,
    direction: Direction,
    spacing: f32,
    min_steps: usize,
) -> Vec<Vec2> {
    let sweep = angle_deg.to_radians();
    let side = direction.sign();
    let center = entry.position + entry.normal() * radius * side;
    let start_angle = (entry.position - center).to_angle();
    let steps = ((radius * sweep / spacing).floor() as usize).max(min_steps);

    (0..=steps)
        .map(|i| {
            let angle = start_angle + side * sweep * (i as f32 / steps as f32);
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

fn trace_sine(
    entry: Pose,
    length: f32,
    amplitude: f32,
    turns: u32,
    direction: Direction,
    spacing: f32,
) -> Vec<Vec2> {
    let steps = ((length / spacing).floor() as usize).max(1);
    let forward = entry.direction();
    let lateral = entry.normal();
    let side = direction.sign();

    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let offset = (t * turns as f32 * std::f32::consts::TAU).sin() * amplitude * side;
            entry.position + forward * (t * length) + lateral * offset
        })
        .collect()
}
