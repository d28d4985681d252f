//! Repair passes and quality diagnosis for generated circuits.
//!
//! Both validators mutate the candidate polyline rather than rejecting it:
//! degenerate segments are dropped and over-sharp transitions are nudged
//! toward their neighborhood. Diagnosis condenses what remains into a
//! 0-100 score consumed by the retry loop.
use glam::Vec2;

use crate::circuit::turn_angle;

/// Neighborhood blend applied when relaxing an over-sharp point.
const REPAIR_WEIGHTS: [f32; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];
const REPAIR_BLEND: f32 = 0.3;

/// Score penalty per sharp transition left after repair.
const SHARP_PENALTY: f32 = 5.0;
/// Segments below this length trigger the flat short-segment penalty.
const SHORT_SEGMENT_FLOOR: f32 = 5.0;
const SHORT_SEGMENT_PENALTY: f32 = 20.0;

/// Drop points closer than `min_length` to the previously retained point,
/// then trim trailing points that land degenerately close to the start while
/// more than three points remain. Zero-length segments break direction math
/// downstream, so this runs before any angle-based pass.
pub fn enforce_min_segment_length(points: &[Vec2], min_length: f32) -> Vec<Vec2> {
    let mut retained: Vec<Vec2> = Vec::with_capacity(points.len());
    for &point in points {
        match retained.last() {
            Some(last) if last.distance(point) < min_length => {}
            _ => retained.push(point),
        }
    }

    while retained.len() > 3 {
        let wrap = retained[0].distance(retained[retained.len() - 1]);
        if wrap < min_length {
            retained.pop();
        } else {
            break;
        }
    }

    retained
}

/// Relax every point whose turn angle exceeds `max_angle` toward a weighted
/// blend of its five-point neighborhood. One pass; residual sharp points are
/// counted by [diagnose] and costed in the score instead of looping here.
pub fn relax_sharp_transitions(points: &[Vec2], max_angle: f32) -> Vec<Vec2> {
    let n = points.len();
    if n < REPAIR_WEIGHTS.len() {
        return points.to_vec();
    }

    let mut out = points.to_vec();
    for i in 0..n {
        let prev = out[(i + n - 1) % n];
        let next = out[(i + 1) % n];
        if turn_angle(prev, out[i], next) <= max_angle {
            continue;
        }

        let mut blend = Vec2::ZERO;
        for (k, weight) in REPAIR_WEIGHTS.iter().enumerate() {
            blend += out[(i + n - 2 + k) % n] * *weight;
        }
        out[i] = out[i].lerp(blend, REPAIR_BLEND);
    }

    out
}

/// Count of turn angles above `max_angle`, over the closed polyline.
pub fn count_sharp_transitions(points: &[Vec2], max_angle: f32) -> usize {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    (0..n)
        .filter(|&i| {
            turn_angle(points[(i + n - 1) % n], points[i], points[(i + 1) % n]) > max_angle
        })
        .count()
}

/// Aggregate quality statistics for a closed circuit polyline.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualityReport {
    /// Heuristic 0-100 score; higher is better.
    pub score: f32,
    /// Turn angles above the safe threshold, after repair.
    pub sharp_transitions: usize,
    pub min_segment_length: f32,
    pub max_segment_length: f32,
    pub mean_segment_length: f32,
    /// Total circuit length including the wrap-around segment.
    pub total_length: f32,
    pub point_count: usize,
}

impl QualityReport {
    fn empty() -> Self {
        Self {
            score: 0.0,
            sharp_transitions: 0,
            min_segment_length: 0.0,
            max_segment_length: 0.0,
            mean_segment_length: 0.0,
            total_length: 0.0,
            point_count: 0,
        }
    }
}

/// Measure the closed polyline and derive its quality score.
pub fn diagnose(points: &[Vec2], max_angle: f32) -> QualityReport {
    let n = points.len();
    if n < 3 {
        return QualityReport::empty();
    }

    let mut min_segment = f32::INFINITY;
    let mut max_segment: f32 = 0.0;
    let mut total = 0.0;
    for i in 0..n {
        let length = points[i].distance(points[(i + 1) % n]);
        min_segment = min_segment.min(length);
        max_segment = max_segment.max(length);
        total += length;
    }

    let sharp = count_sharp_transitions(points, max_angle);

    let short_penalty = if min_segment < SHORT_SEGMENT_FLOOR {
        SHORT_SEGMENT_PENALTY
    } else {
        0.0
    };
    let score = (100.0 - sharp as f32 * SHARP_PENALTY - short_penalty).max(0.0);

    QualityReport {
        score,
        sharp_transitions: sharp,
        min_segment_length: min_segment,
        max_segment_length: max_segment,
        mean_segment_length: total / n as f32,
        total_length: total,
        point_count: n,
    }
}
