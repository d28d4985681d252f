//! Adaptive weighted smoothing of the closed circuit polyline.
use std::f32::consts::PI;

use glam::Vec2;

use crate::circuit::turn_angle;

/// Gaussian-like window over two neighbors on each side, circular.
const WINDOW_WEIGHTS: [f32; 5] = [0.1, 0.25, 0.3, 0.25, 0.1];
/// Extra blend applied in proportion to the local turn sharpness.
const ADAPTIVE_GAIN: f32 = 0.2;

/// Run `passes` smoothing passes over the closed polyline. Sharper corners
/// are pulled harder toward their windowed average; straights barely move.
pub fn smooth(points: &[Vec2], passes: usize, base_factor: f32) -> Vec<Vec2> {
    if points.len() < WINDOW_WEIGHTS.len() {
        return points.to_vec();
    }

    let mut current = points.to_vec();
    for _ in 0..passes {
        current = smooth_pass(&current, base_factor);
    }
    current
}

fn smooth_pass(points: &[Vec2], base_factor: f32) -> Vec<Vec2> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let window = [
            points[(i + n - 2) % n],
            points[(i + n - 1) % n],
            points[i],
            points[(i + 1) % n],
            points[(i + 2) % n],
        ];

        let mut average = Vec2::ZERO;
        for (weight, point) in WINDOW_WEIGHTS.iter().zip(window.iter()) {
            average += *point * *weight;
        }

        let strength = turn_angle(window[1], window[2], window[3]) / PI;
        let blend = (base_factor + strength * ADAPTIVE_GAIN).clamp(0.0, 1.0);
        out.push(points[i].lerp(average, blend));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_loop(side: usize, spacing: f32) -> Vec<Vec2> {
        let mut points = Vec::new();
        for i in 0..side {
            points.push(Vec2::new(i as f32 * spacing, 0.0));
        }
        for i in 0..side {
            points.push(Vec2::new(side as f32 * spacing, i as f32 * spacing));
        }
        for i in 0..side {
            points.push(Vec2::new((side - i) as f32 * spacing, side as f32 * spacing));
        }
        for i in 0..side {
            points.push(Vec2::new(0.0, (side - i) as f32 * spacing));
        }
        points
    }

    fn max_turn_angle(points: &[Vec2]) -> f32 {
        let n = points.len();
        (0..n)
            .map(|i| turn_angle(points[(i + n - 1) % n], points[i], points[(i + 1) % n]))
            .fold(0.0, f32::max)
    }

    #[test]
    fn smoothing_reduces_the_sharpest_angle() {
        let loop_points = square_loop(6, 10.0);
        let before = max_turn_angle(&loop_points);
        let after = max_turn_angle(&smooth(&loop_points, 2, 0.25));
        assert!(after < before, "expected {after} < {before}");
    }

    #[test]
    fn smoothing_leaves_a_straight_run_nearly_untouched() {
        // A long thin loop; the mid-run points of each long edge sit on a
        // straight and should not drift laterally by more than a whisker.
        let loop_points = square_loop(12, 10.0);
        let smoothed = smooth(&loop_points, 1, 0.25);
        // Point 6 is deep inside the first straight edge (y == 0).
        assert!(smoothed[6].y.abs() < 0.5);
    }

    #[test]
    fn zero_passes_is_the_identity() {
        let loop_points = square_loop(4, 10.0);
        assert_eq!(smooth(&loop_points, 0, 0.25), loop_points);
    }

    #[test]
    fn tiny_inputs_pass_through() {
        let points = vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        assert_eq!(smooth(&points, 3, 0.25), points);
    }
}
