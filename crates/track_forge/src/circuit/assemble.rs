//! Chains planned sections into one polyline and closes the loop.
use glam::Vec2;

use crate::circuit::section::{Pose, Section};

/// Gap below which the start and end are considered already joined.
pub(crate) const CLOSURE_SKIP_THRESHOLD: f32 = 5.0;
/// Control-point reach along each tangent, as a fraction of the gap.
const CLOSURE_TANGENT_REACH: f32 = 0.3;
/// Target spacing of the sampled bridge points.
const CLOSURE_SAMPLE_SPACING: f32 = 8.0;
const CLOSURE_MIN_SAMPLES: usize = 8;

/// Trace all sections in order from the origin pose. Every section after the
/// first drops its entry point, which duplicates the running end position.
pub fn assemble(sections: &[Section], spacing: f32) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = Vec::new();
    let mut pose = Pose::new(Vec2::ZERO, 0.0);

    for (i, section) in sections.iter().enumerate() {
        let traced = section.trace(pose, spacing);
        points.extend(traced.into_iter().skip(usize::from(i > 0)));
        pose = pose_from_tail(&points);
    }

    points
}

/// Exit pose implied by the last two points of the running polyline.
fn pose_from_tail(points: &[Vec2]) -> Pose {
    match points {
        [.., a, b] => Pose::new(*b, (*b - *a).to_angle()),
        [b] => Pose::new(*b, 0.0),
        [] => Pose::new(Vec2::ZERO, 0.0),
    }
}

/// Bridge the gap between the polyline's end and start with a cubic Bezier
/// that respects both tangents, so the closing stretch carries no kink. The
/// sampled bridge points are appended; the loop remains implicit (last point
/// connects back to index 0).
pub fn close_circuit(mut points: Vec<Vec2>) -> Vec<Vec2> {
    if points.len() < 4 {
        return points;
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let gap = first.distance(last);
    if gap <= CLOSURE_SKIP_THRESHOLD {
        return points;
    }

    let exit_tangent = (last - points[points.len() - 2]).normalize_or_zero();
    let entry_tangent = (points[1] - first).normalize_or_zero();
    let reach = gap * CLOSURE_TANGENT_REACH;

    let b0 = last;
    let b1 = last + exit_tangent * reach;
    let b2 = first - entry_tangent * reach;
    let b3 = first;

    let samples = ((gap / CLOSURE_SAMPLE_SPACING).floor() as usize).max(CLOSURE_MIN_SAMPLES);
    for i in 1..=samples {
        let t = i as f32 / (samples + 1) as f32;
        points.push(cubic_bezier(b0, b1, b2, b3, t));
    }

    points
}

fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use crate::circuit::section::Direction;

    use super::*;

    #[test]
    fn assemble_drops_duplicate_join_points() {
        let sections = [
            Section::Straight { length: 100.0 },
            Section::Corner {
                angle_deg: 90.0,
                radius: 60.0,
                direction: Direction::Left,
            },
        ];
        let points = assemble(&sections, 10.0);

        // 11 straight points plus the corner run minus its duplicated entry.
        let corner_points = sections[1]
            .trace(Pose::new(Vec2::ZERO, 0.0), 10.0)
            .len();
        assert_eq!(points.len(), 11 + corner_points - 1);

        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) > 1e-3, "duplicate point at join");
        }
    }

    #[test]
    fn assemble_continues_along_the_running_heading() {
        let sections = [
            Section::Straight { length: 60.0 },
            Section::Straight { length: 60.0 },
        ];
        let points = assemble(&sections, 10.0);

        // Two straights chained along the same heading stay collinear.
        for p in &points {
            assert!(p.y.abs() < 1e-3);
        }
        let last = points.last().expect("points");
        assert!((last.x - 120.0).abs() < 1e-3);
    }

    #[test]
    fn close_circuit_skips_an_already_closed_loop() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 3.0),
        ];
        let closed = close_circuit(points.clone());
        assert_eq!(closed, points);
    }

    #[test]
    fn close_circuit_bridges_a_wide_gap() {
        // An open quarter-arc-ish path with a 100-unit gap back to start.
        let points: Vec<Vec2> = (0..=10)
            .map(|i| Vec2::new(i as f32 * 10.0, (i as f32 * 2.0).min(40.0)))
            .collect();
        let before = points.len();
        let first = points[0];
        let gap = first.distance(*points.last().expect("points"));

        let closed = close_circuit(points);
        assert!(closed.len() > before);

        // Appended bridge points march monotonically closer to the start.
        let bridge = &closed[before..];
        let mut last_distance = gap;
        for p in bridge {
            let d = p.distance(first);
            assert!(d < last_distance + 15.0);
            last_distance = d;
        }
        let final_gap = closed.last().expect("points").distance(first);
        assert!(final_gap < gap * 0.25, "gap {final_gap} not reduced from {gap}");
    }
}
