//! Circuit generation pipeline.
//!
//! A circuit is built in fixed stages: plan a section sequence, trace and
//! chain the sections into a polyline, close the loop with a Bezier bridge,
//! repair degenerate segments and sharp transitions, smooth, then diagnose.
//! The stages are pure functions over point sequences; the retry loop in
//! [generator] runs the whole pipeline per attempt and keeps the best result.
use glam::Vec2;

pub mod assemble;
pub mod generator;
pub mod plan;
pub mod section;
pub mod smooth;
pub mod validate;

pub use generator::{CircuitGenerator, GenerationReport, GeneratorConfig};
pub use section::{Direction, Pose, Section};
pub use validate::QualityReport;

/// Turn angle at `current` between the incoming and outgoing directions, in
/// radians. Zero for a straight continuation, approaching pi for a reversal.
pub(crate) fn turn_angle(prev: Vec2, current: Vec2, next: Vec2) -> f32 {
    let incoming = (current - prev).normalize_or_zero();
    let outgoing = (next - current).normalize_or_zero();
    if incoming == Vec2::ZERO || outgoing == Vec2::ZERO {
        return 0.0;
    }
    incoming.dot(outgoing).clamp(-1.0, 1.0).acos()
}
