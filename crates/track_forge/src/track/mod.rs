//! The published track: closed circuit polyline plus derived placements and
//! the queries collaborators drive against.
//!
//! A [Track] is immutable once constructed. Regeneration builds a wholly new
//! value; consumers holding karts or lap counters reposition them against
//! the new instance themselves.
use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info};

use crate::circuit::generator::{CircuitGenerator, GenerationReport, GeneratorConfig};
use crate::error::{Error, Result};
use crate::scatter::{scatter_trees, Tree, TreeScatterConfig};

/// An anti-shortcut gate on the racing line. A lap only counts when every
/// checkpoint id has been collected since the previous finish-line crossing;
/// that visited-set bookkeeping belongs to the lap tracker, not the track.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub id: u32,
    pub position: Vec2,
    /// Heading of the racing line at the gate, in radians.
    pub heading: f32,
    pub detection_radius: f32,
}

/// Configuration for building a complete track.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackConfig {
    pub generator: GeneratorConfig,
    pub scatter: TreeScatterConfig,
    pub checkpoint_count: usize,
    pub checkpoint_radius: f32,
    /// Fractional arc position of the start/finish line, inside the
    /// guaranteed-straight opening section.
    pub start_fraction: f32,
    /// Start-grid slots and their lateral spacing on the perpendicular.
    pub grid_slots: usize,
    pub grid_spacing: f32,
    /// Detection radius of the finish-line crossing check.
    pub finish_radius: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            scatter: TreeScatterConfig::default(),
            checkpoint_count: 4,
            checkpoint_radius: 20.0,
            start_fraction: 0.10,
            grid_slots: 4,
            grid_spacing: 9.0,
            finish_radius: 10.0,
        }
    }
}

impl TrackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_scatter(mut self, scatter: TreeScatterConfig) -> Self {
        self.scatter = scatter;
        self
    }

    pub fn with_checkpoints(mut self, count: usize, detection_radius: f32) -> Self {
        self.checkpoint_count = count;
        self.checkpoint_radius = detection_radius;
        self
    }

    pub fn with_start_grid(mut self, slots: usize, spacing: f32) -> Self {
        self.grid_slots = slots;
        self.grid_spacing = spacing;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.scatter.validate()?;

        if self.checkpoint_count == 0 {
            return Err(Error::InvalidConfig("checkpoint_count must be >= 1".into()));
        }
        if self.checkpoint_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "checkpoint_radius must be > 0".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.start_fraction) {
            return Err(Error::InvalidConfig(
                "start_fraction must be in [0, 1)".into(),
            ));
        }
        if self.grid_slots == 0 {
            return Err(Error::InvalidConfig("grid_slots must be >= 1".into()));
        }
        if self.grid_spacing <= 0.0 || self.finish_radius <= 0.0 {
            return Err(Error::InvalidConfig(
                "grid_spacing and finish_radius must be > 0".into(),
            ));
        }

        Ok(())
    }
}

/// A generated racing circuit, published to physics, AI, and rendering.
#[derive(Debug, Clone)]
pub struct Track {
    config: TrackConfig,
    points: Vec<Vec2>,
    start_index: usize,
    checkpoints: Vec<Checkpoint>,
    trees: Vec<Tree>,
}

impl Track {
    /// Run the full generation pipeline: circuit, start line, checkpoints,
    /// tree scatter. Returns the immutable track with its quality report.
    pub fn generate<R: RngCore>(
        config: TrackConfig,
        rng: &mut R,
    ) -> Result<(Self, GenerationReport)> {
        config.validate()?;

        let generator = CircuitGenerator::try_new(config.generator.clone())?;
        let (points, report) = generator.generate(rng);

        let start_index = start_index(points.len(), config.start_fraction);
        let checkpoints = place_checkpoints(
            &points,
            config.checkpoint_count,
            config.checkpoint_radius,
        );
        let trees = scatter_trees(&points, &config.scatter, rng);

        info!(
            "track ready: {} points, {} checkpoints, {} trees, score {:.0}",
            points.len(),
            checkpoints.len(),
            trees.len(),
            report.quality.score
        );

        Ok((
            Self {
                config,
                points,
                start_index,
                checkpoints,
                trees,
            },
            report,
        ))
    }

    /// Build a replacement circuit with this track's configuration. The
    /// current instance is untouched; previously placed entities must be
    /// repositioned against the returned track by their owners.
    pub fn regenerate<R: RngCore>(&self, rng: &mut R) -> Result<(Self, GenerationReport)> {
        Self::generate(self.config.clone(), rng)
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// The closed circuit polyline; the last point connects back to index 0.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn start_line_index(&self) -> usize {
        self.start_index
    }

    /// Position of the start/finish line on the racing line.
    pub fn start_line_position(&self) -> Vec2 {
        self.points[self.start_index]
    }

    /// Grid slot position for a competitor: a lateral offset from the start
    /// point along the perpendicular, slots centered around the racing line.
    pub fn start_position(&self, slot: usize) -> Vec2 {
        let perpendicular = self.heading_at(self.start_index).perp();
        let centered = slot as f32 - (self.config.grid_slots as f32 - 1.0) / 2.0;
        self.start_line_position() + perpendicular * (centered * self.config.grid_spacing)
    }

    /// Interface seam for elevation; the world is currently flat.
    pub fn terrain_height(&self, _x: f32, _z: f32) -> f32 {
        0.0
    }

    /// First tree whose collision circle intersects the probe circle.
    pub fn tree_collision(&self, position: Vec2, radius: f32) -> Option<&Tree> {
        self.trees
            .iter()
            .find(|tree| position.distance(tree.position) < tree.collision_radius + radius)
    }

    /// Ids of all checkpoints whose gate the probe is currently inside.
    pub fn checkpoints_in_range(&self, position: Vec2, radius: f32) -> Vec<u32> {
        self.checkpoints
            .iter()
            .filter(|cp| position.distance(cp.position) < cp.detection_radius + radius)
            .map(|cp| cp.id)
            .collect()
    }

    /// Finish-line proximity only; unaware of checkpoint history.
    pub fn lap_completed(&self, position: Vec2, radius: f32) -> bool {
        position.distance(self.start_line_position()) < self.config.finish_radius + radius
    }

    /// Full lap validation: the crossing only counts when every checkpoint
    /// id has been visited. Incomplete crossings are logged as shortcuts.
    pub fn validate_lap(&self, position: Vec2, visited: &[u32], radius: f32) -> bool {
        if !self.lap_completed(position, radius) {
            return false;
        }

        let missing = self
            .checkpoints
            .iter()
            .filter(|cp| !visited.contains(&cp.id))
            .count();
        if missing > 0 {
            debug!(
                "shortcut detected: finish crossed with {missing} of {} checkpoints unvisited",
                self.checkpoints.len()
            );
            return false;
        }

        true
    }

    /// Unit direction of the racing line at the given point index.
    fn heading_at(&self, index: usize) -> Vec2 {
        direction_at(&self.points, index)
    }
}

fn start_index(point_count: usize, fraction: f32) -> usize {
    ((point_count as f32 * fraction) as usize).min(point_count.saturating_sub(1))
}

fn place_checkpoints(points: &[Vec2], count: usize, detection_radius: f32) -> Vec<Checkpoint> {
    let n = points.len();
    (0..count)
        .map(|i| {
            let fraction = (i + 1) as f32 / (count + 1) as f32;
            // Strictly between the first and last index.
            let index = ((n as f32 * fraction) as usize).clamp(1, n.saturating_sub(2).max(1));
            Checkpoint {
                id: i as u32,
                position: points[index],
                heading: direction_at(points, index).to_angle(),
                detection_radius,
            }
        })
        .collect()
}

fn direction_at(points: &[Vec2], index: usize) -> Vec2 {
    let next = points[(index + 1) % points.len()];
    (next - points[index]).normalize_or_zero()
}
