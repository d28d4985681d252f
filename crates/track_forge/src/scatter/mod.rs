//! Track-side tree scatter.
//!
//! Two passes over the terrain square centered on the circuit origin: a
//! jittered grid pass sized from the target count, then a fill pass that
//! tops up sparse areas with probabilistically chosen strategies. Every
//! candidate is rejection-checked for track clearance (against sampled
//! track points, not the full polyline), terrain bounds, a center-distance
//! cap, and spacing to already placed trees.
use glam::Vec2;
use rand::RngCore;
use tracing::info;

use crate::error::{Error, Result};
use crate::sampling::{rand01, rand_bool, rand_index, rand_range};

pub mod fill;

use fill::FillStrategy;

/// Jitter span of a grid candidate, as a fraction of the cell size.
const CELL_JITTER_SPAN: (f32, f32) = (0.7, 1.3);
/// Random slack added to the center-distance cap per candidate.
const CENTER_DISTANCE_SLACK: f32 = 20.0;
/// Fill-pass spacing is scaled per candidate within this band.
const FILL_SPACING_SCALE: (f32, f32) = (0.7, 1.3);

/// A placed tree with its collision footprint.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    pub position: Vec2,
    pub collision_radius: f32,
}

/// Configuration for tree scatter.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeScatterConfig {
    /// Target count for the grid pass; the actual yield is lower wherever
    /// clearance rejects candidates.
    pub tree_count: usize,
    /// Side length of the terrain square centered on the origin.
    pub terrain_extent: f32,
    pub min_distance_from_track: f32,
    /// Center-distance cap keeping trees near the circuit.
    pub max_distance_from_track: f32,
    /// Minimum spacing between trees.
    pub min_spacing: f32,
    /// Probability that a grid cell receives a placement attempt at all.
    pub cell_keep_probability: f32,
    /// Jittered candidates tried per kept cell before giving up on it.
    pub cell_attempts: usize,
    /// Extra trees added by the fill pass.
    pub fill_count: usize,
    /// Candidates tried per fill tree before giving up on it.
    pub fill_attempts: usize,
    /// Track clearance is checked against every `track_sample_stride`-th
    /// polyline point rather than exhaustively.
    pub track_sample_stride: usize,
    /// Collision radius assigned to every placed tree.
    pub collision_radius: f32,
}

impl Default for TreeScatterConfig {
    fn default() -> Self {
        Self {
            tree_count: 180,
            terrain_extent: 400.0,
            min_distance_from_track: 20.0,
            max_distance_from_track: 150.0,
            min_spacing: 8.0,
            cell_keep_probability: 0.8,
            cell_attempts: 25,
            fill_count: 50,
            fill_attempts: 35,
            track_sample_stride: 10,
            collision_radius: 2.5,
        }
    }
}

/// Density profiles for [TreeScatterConfig::randomized]: keep probability
/// paired with a count multiplier, from dense woodland to sparse.
const DENSITY_PROFILES: [(f32, f32); 3] = [(0.8, 1.2), (0.5, 0.8), (0.3, 0.6)];

impl TreeScatterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a fresh configuration the way the game rolls one per circuit:
    /// base count 150-250 scaled by a random density profile, clearances
    /// and spacing from their documented bands.
    pub fn randomized(rng: &mut dyn RngCore) -> Self {
        let base_count = 150 + rand_index(rng, 101);
        let (keep_probability, multiplier) =
            DENSITY_PROFILES[rand_index(rng, DENSITY_PROFILES.len())];

        Self {
            tree_count: (base_count as f32 * multiplier) as usize,
            min_distance_from_track: rand_range(rng, 18.0, 26.0),
            max_distance_from_track: rand_range(rng, 120.0, 180.0),
            min_spacing: rand_range(rng, 6.0, 10.0),
            cell_keep_probability: keep_probability,
            fill_count: 30 + rand_index(rng, 41),
            track_sample_stride: 8 + rand_index(rng, 7),
            ..Self::default()
        }
    }

    pub fn with_tree_count(mut self, tree_count: usize) -> Self {
        self.tree_count = tree_count;
        self
    }

    pub fn with_terrain_extent(mut self, terrain_extent: f32) -> Self {
        self.terrain_extent = terrain_extent;
        self
    }

    pub fn with_track_clearance(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance_from_track = min_distance;
        self.max_distance_from_track = max_distance;
        self
    }

    pub fn with_min_spacing(mut self, min_spacing: f32) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn with_fill_count(mut self, fill_count: usize) -> Self {
        self.fill_count = fill_count;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.terrain_extent <= 0.0 {
            return Err(Error::InvalidConfig("terrain_extent must be > 0".into()));
        }
        if self.min_distance_from_track < 0.0
            || self.max_distance_from_track <= self.min_distance_from_track
        {
            return Err(Error::InvalidConfig(
                "track clearance must satisfy 0 <= min < max".into(),
            ));
        }
        if self.min_spacing <= 0.0 {
            return Err(Error::InvalidConfig("min_spacing must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.cell_keep_probability) {
            return Err(Error::InvalidConfig(
                "cell_keep_probability must be in [0, 1]".into(),
            ));
        }
        if self.track_sample_stride == 0 {
            return Err(Error::InvalidConfig(
                "track_sample_stride must be >= 1".into(),
            ));
        }
        if self.collision_radius <= 0.0 {
            return Err(Error::InvalidConfig("collision_radius must be > 0".into()));
        }

        Ok(())
    }
}

/// Scatter trees around the given circuit polyline.
pub fn scatter_trees(
    track_points: &[Vec2],
    config: &TreeScatterConfig,
    rng: &mut impl RngCore,
) -> Vec<Tree> {
    let mut trees = Vec::with_capacity(config.tree_count + config.fill_count);

    place_grid_pass(track_points, config, rng, &mut trees);
    let grid_count = trees.len();
    place_fill_pass(track_points, config, rng, &mut trees);

    info!(
        "scattered {} trees ({} grid, {} fill)",
        trees.len(),
        grid_count,
        trees.len() - grid_count
    );
    trees
}

fn place_grid_pass(
    track_points: &[Vec2],
    config: &TreeScatterConfig,
    rng: &mut impl RngCore,
    trees: &mut Vec<Tree>,
) {
    let grid_size = ((config.tree_count as f32).sqrt().ceil() as usize).max(1);
    let cell_size = config.terrain_extent / grid_size as f32;
    let half_grid = grid_size as f32 / 2.0;

    for grid_x in 0..grid_size {
        for grid_z in 0..grid_size {
            if !rand_bool(rng, config.cell_keep_probability) {
                continue;
            }

            let cell_center = Vec2::new(
                (grid_x as f32 - half_grid + 0.5) * cell_size,
                (grid_z as f32 - half_grid + 0.5) * cell_size,
            );

            for _ in 0..config.cell_attempts {
                let span = cell_size * rand_range(rng, CELL_JITTER_SPAN.0, CELL_JITTER_SPAN.1);
                let candidate = cell_center
                    + Vec2::new(
                        (rand01(rng) - 0.5) * span,
                        (rand01(rng) - 0.5) * span,
                    );

                if accept(candidate, track_points, trees, config, config.min_spacing, rng) {
                    trees.push(Tree {
                        position: candidate,
                        collision_radius: config.collision_radius,
                    });
                    break;
                }
            }
        }
    }
}

fn place_fill_pass(
    track_points: &[Vec2],
    config: &TreeScatterConfig,
    rng: &mut impl RngCore,
    trees: &mut Vec<Tree>,
) {
    for _ in 0..config.fill_count {
        for _ in 0..config.fill_attempts {
            let candidate = FillStrategy::roll(rng).propose(config, rng);
            let spacing =
                config.min_spacing * rand_range(rng, FILL_SPACING_SCALE.0, FILL_SPACING_SCALE.1);

            if accept(candidate, track_points, trees, config, spacing, rng) {
                trees.push(Tree {
                    position: candidate,
                    collision_radius: config.collision_radius,
                });
                break;
            }
        }
    }
}

fn accept(
    candidate: Vec2,
    track_points: &[Vec2],
    trees: &[Tree],
    config: &TreeScatterConfig,
    spacing: f32,
    rng: &mut impl RngCore,
) -> bool {
    let half = config.terrain_extent * 0.5;
    if candidate.x.abs() > half || candidate.y.abs() > half {
        return false;
    }

    if !clear_of_track(
        candidate,
        track_points,
        config.min_distance_from_track,
        config.track_sample_stride,
    ) {
        return false;
    }

    let center_cap = config.max_distance_from_track + rand01(rng) * CENTER_DISTANCE_SLACK;
    if candidate.length() > center_cap {
        return false;
    }

    clear_of_trees(candidate, trees, spacing)
}

fn clear_of_track(position: Vec2, track_points: &[Vec2], min_distance: f32, stride: usize) -> bool {
    track_points
        .iter()
        .step_by(stride.max(1))
        .all(|p| position.distance(*p) >= min_distance)
}

fn clear_of_trees(position: Vec2, trees: &[Tree], min_spacing: f32) -> bool {
    trees.iter().all(|t| position.distance(t.position) >= min_spacing)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn circle_track(radius: f32, count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * std::f32::consts::TAU;
                Vec2::from_angle(a) * radius
            })
            .collect()
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(TreeScatterConfig::default()
            .with_terrain_extent(0.0)
            .validate()
            .is_err());
        assert!(TreeScatterConfig::default()
            .with_track_clearance(50.0, 40.0)
            .validate()
            .is_err());
        assert!(TreeScatterConfig::default()
            .with_min_spacing(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn randomized_configs_stay_in_their_bands() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = TreeScatterConfig::randomized(&mut rng);

            config.validate().expect("randomized config is valid");
            assert!((90..=300).contains(&config.tree_count));
            assert!((18.0..26.0).contains(&config.min_distance_from_track));
            assert!((120.0..180.0).contains(&config.max_distance_from_track));
            assert!((6.0..10.0).contains(&config.min_spacing));
            assert!((30..=70).contains(&config.fill_count));
            assert!((8..=14).contains(&config.track_sample_stride));
        }
    }

    #[test]
    fn trees_respect_track_clearance_at_the_sampled_points() {
        let track = circle_track(120.0, 90);
        let config = TreeScatterConfig::default();
        let mut rng = StdRng::seed_from_u64(21);

        let trees = scatter_trees(&track, &config, &mut rng);
        assert!(!trees.is_empty());

        for tree in &trees {
            let nearest = track
                .iter()
                .step_by(config.track_sample_stride)
                .map(|p| tree.position.distance(*p))
                .fold(f32::INFINITY, f32::min);
            assert!(
                nearest >= config.min_distance_from_track,
                "tree at {:?} clears only {nearest}",
                tree.position
            );
        }
    }

    #[test]
    fn trees_respect_mutual_spacing() {
        let track = circle_track(120.0, 90);
        let config = TreeScatterConfig::default();
        let mut rng = StdRng::seed_from_u64(22);

        let trees = scatter_trees(&track, &config, &mut rng);
        let floor = config.min_spacing * FILL_SPACING_SCALE.0;

        for (i, a) in trees.iter().enumerate() {
            for b in trees.iter().skip(i + 1) {
                assert!(
                    a.position.distance(b.position) >= floor,
                    "trees too close: {:?} / {:?}",
                    a.position,
                    b.position
                );
            }
        }
    }

    #[test]
    fn trees_stay_inside_the_terrain_and_near_the_circuit() {
        let track = circle_track(120.0, 90);
        let config = TreeScatterConfig::default();
        let mut rng = StdRng::seed_from_u64(23);

        let trees = scatter_trees(&track, &config, &mut rng);
        let half = config.terrain_extent * 0.5;
        let cap = config.max_distance_from_track + CENTER_DISTANCE_SLACK;

        for tree in &trees {
            assert!(tree.position.x.abs() <= half);
            assert!(tree.position.y.abs() <= half);
            assert!(tree.position.length() <= cap + 1e-3);
            assert_eq!(tree.collision_radius, config.collision_radius);
        }
    }

    #[test]
    fn scatter_is_deterministic_for_the_same_seed() {
        let track = circle_track(120.0, 90);
        let config = TreeScatterConfig::default();

        let mut rng_a = StdRng::seed_from_u64(5);
        let mut rng_b = StdRng::seed_from_u64(5);
        assert_eq!(
            scatter_trees(&track, &config, &mut rng_a),
            scatter_trees(&track, &config, &mut rng_b)
        );
    }
}
