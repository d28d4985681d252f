//! Full generation pipeline with quality-gated retries.
use glam::Vec2;
use rand::RngCore;
use tracing::{info, warn};

use crate::circuit::assemble::{assemble, close_circuit};
use crate::circuit::plan::plan_sections;
use crate::circuit::smooth::smooth;
use crate::circuit::validate::{
    diagnose, enforce_min_segment_length, relax_sharp_transitions, QualityReport,
};
use crate::error::{Error, Result};

/// Configuration for circuit generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Target spacing between traced points in world units.
    pub point_spacing: f32,
    pub min_sections: usize,
    pub max_sections: usize,
    /// Segment-length floor enforced by the repair pass.
    pub min_segment_length: f32,
    /// Maximum safe turn angle in radians; sharper transitions get relaxed.
    pub max_turn_angle: f32,
    pub smoothing_passes: usize,
    /// Base blend factor of the adaptive smoother, in [0, 1].
    pub smoothing_factor: f32,
    /// Score at which an attempt is accepted without further retries.
    pub quality_target: f32,
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            point_spacing: 10.0,
            min_sections: 6,
            max_sections: 9,
            min_segment_length: 8.0,
            max_turn_angle: 60.0_f32.to_radians(),
            smoothing_passes: 2,
            smoothing_factor: 0.25,
            quality_target: 80.0,
            max_attempts: 3,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point_spacing(mut self, point_spacing: f32) -> Self {
        self.point_spacing = point_spacing;
        self
    }

    pub fn with_sections(mut self, min_sections: usize, max_sections: usize) -> Self {
        self.min_sections = min_sections;
        self.max_sections = max_sections;
        self
    }

    pub fn with_min_segment_length(mut self, min_segment_length: f32) -> Self {
        self.min_segment_length = min_segment_length;
        self
    }

    pub fn with_max_turn_angle(mut self, max_turn_angle: f32) -> Self {
        self.max_turn_angle = max_turn_angle;
        self
    }

    pub fn with_smoothing(mut self, passes: usize, factor: f32) -> Self {
        self.smoothing_passes = passes;
        self.smoothing_factor = factor;
        self
    }

    pub fn with_quality_target(mut self, quality_target: f32) -> Self {
        self.quality_target = quality_target;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.point_spacing <= 0.0 {
            return Err(Error::InvalidConfig("point_spacing must be > 0".into()));
        }
        if self.min_sections == 0 || self.min_sections > self.max_sections {
            return Err(Error::InvalidConfig(
                "section counts must satisfy 1 <= min <= max".into(),
            ));
        }
        if self.min_segment_length <= 0.0 {
            return Err(Error::InvalidConfig(
                "min_segment_length must be > 0".into(),
            ));
        }
        if self.max_turn_angle <= 0.0 {
            return Err(Error::InvalidConfig("max_turn_angle must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(Error::InvalidConfig(
                "smoothing_factor must be in [0, 1]".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be >= 1".into()));
        }

        Ok(())
    }
}

/// Outcome of a generation run: the accepted quality plus how the retry
/// budget was spent.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationReport {
    pub quality: QualityReport,
    /// Attempts actually run, including the accepted one.
    pub attempts: usize,
    /// Whether the accepted attempt reached the quality target.
    pub met_target: bool,
}

/// Generates closed circuit polylines, retrying until the quality target is
/// met or the attempt budget runs out. Generation never fails: when every
/// attempt falls short, the best-scoring candidate is returned.
#[derive(Debug, Clone)]
pub struct CircuitGenerator {
    config: GeneratorConfig,
}

impl CircuitGenerator {
    pub fn try_new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run up to `max_attempts` full pipeline attempts and return the best
    /// candidate with its report.
    pub fn generate<R: RngCore>(&self, rng: &mut R) -> (Vec<Vec2>, GenerationReport) {
        let mut best: Option<(Vec<Vec2>, QualityReport)> = None;
        let mut attempts = 0;

        for attempt in 1..=self.config.max_attempts {
            attempts = attempt;
            let (points, quality) = self.attempt(rng);
            info!(
                "circuit attempt {attempt}: score {:.0}, {} points, length {:.0}",
                quality.score, quality.point_count, quality.total_length
            );

            let accepted = quality.score >= self.config.quality_target;
            let improved = best
                .as_ref()
                .is_none_or(|(_, incumbent)| quality.score > incumbent.score);
            if improved {
                best = Some((points, quality));
            }
            if accepted {
                break;
            }
        }

        let (points, quality) = best.expect("max_attempts >= 1 yields a candidate");
        let met_target = quality.score >= self.config.quality_target;
        if !met_target {
            warn!(
                "no attempt reached quality target {:.0}; keeping best score {:.0}",
                self.config.quality_target, quality.score
            );
        }

        (
            points,
            GenerationReport {
                quality,
                attempts,
                met_target,
            },
        )
    }

    /// One full pipeline attempt: plan, assemble, close, repair, smooth,
    /// diagnose. Pure with respect to the generator; all state is local.
    fn attempt<R: RngCore>(&self, rng: &mut R) -> (Vec<Vec2>, QualityReport) {
        let sections = plan_sections(rng, self.config.min_sections, self.config.max_sections);
        let assembled = assemble(&sections, self.config.point_spacing);
        let closed = close_circuit(assembled);
        let spaced = enforce_min_segment_length(&closed, self.config.min_segment_length);
        let relaxed = relax_sharp_transitions(&spaced, self.config.max_turn_angle);
        let smoothed = smooth(
            &relaxed,
            self.config.smoothing_passes,
            self.config.smoothing_factor,
        );
        let quality = diagnose(&smoothed, self.config.max_turn_angle);
        (smoothed, quality)
    }
}
