//! Fill placement strategies for the second scatter pass.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;

use crate::sampling::{rand01, rand_range};
use crate::scatter::TreeScatterConfig;

const RADIAL_SHARE: f32 = 0.6;
const CLUSTERED_SHARE: f32 = 0.25;
const CLUSTER_RADIUS: (f32, f32) = (15.0, 40.0);
/// Cluster centers stay away from the terrain rim.
const CLUSTER_CENTER_SPAN: f32 = 0.8;

/// Placement strategy for fill trees, rolled per tree: radial ring around
/// the circuit origin (60%), cluster around a random center (25%), or
/// uniform over the terrain (15%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillStrategy {
    Radial,
    Clustered,
    UniformRandom,
}

impl FillStrategy {
    pub(crate) fn roll(rng: &mut dyn RngCore) -> Self {
        let draw = rand01(rng);
        if draw < RADIAL_SHARE {
            FillStrategy::Radial
        } else if draw < RADIAL_SHARE + CLUSTERED_SHARE {
            FillStrategy::Clustered
        } else {
            FillStrategy::UniformRandom
        }
    }

    /// Propose one candidate position. Clearance checks happen in the
    /// runner; a proposal may land anywhere, including outside the terrain.
    pub(crate) fn propose(&self, config: &TreeScatterConfig, rng: &mut dyn RngCore) -> Vec2 {
        match self {
            FillStrategy::Radial => {
                let angle = rand01(rng) * TAU;
                let radius = rand_range(
                    rng,
                    config.min_distance_from_track,
                    config.max_distance_from_track,
                );
                Vec2::from_angle(angle) * radius
            }
            FillStrategy::Clustered => {
                let center = Vec2::new(
                    (rand01(rng) - 0.5) * config.terrain_extent * CLUSTER_CENTER_SPAN,
                    (rand01(rng) - 0.5) * config.terrain_extent * CLUSTER_CENTER_SPAN,
                );
                let radius = rand_range(rng, CLUSTER_RADIUS.0, CLUSTER_RADIUS.1);
                let angle = rand01(rng) * TAU;
                center + Vec2::from_angle(angle) * radius
            }
            FillStrategy::UniformRandom => Vec2::new(
                (rand01(rng) - 0.5) * config.terrain_extent,
                (rand01(rng) - 0.5) * config.terrain_extent,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn roll_respects_the_configured_shares() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            match FillStrategy::roll(&mut rng) {
                FillStrategy::Radial => counts[0] += 1,
                FillStrategy::Clustered => counts[1] += 1,
                FillStrategy::UniformRandom => counts[2] += 1,
            }
        }
        let share = |n: usize| n as f32 / 4000.0;
        assert!((share(counts[0]) - 0.6).abs() < 0.05);
        assert!((share(counts[1]) - 0.25).abs() < 0.05);
        assert!((share(counts[2]) - 0.15).abs() < 0.05);
    }

    #[test]
    fn radial_proposals_stay_in_the_clearance_ring() {
        let config = TreeScatterConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = FillStrategy::Radial.propose(&config, &mut rng);
            let r = p.length();
            assert!(r >= config.min_distance_from_track - 1e-3);
            assert!(r <= config.max_distance_from_track + 1e-3);
        }
    }

    #[test]
    fn uniform_proposals_cover_the_terrain_square() {
        let config = TreeScatterConfig::default();
        let half = config.terrain_extent * 0.5;
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let p = FillStrategy::UniformRandom.propose(&config, &mut rng);
            assert!(p.x.abs() <= half && p.y.abs() <= half);
        }
    }
}
