#![forbid(unsafe_code)]
//! track_forge: procedural closed-loop racing circuits with quality validation.
//!
//! Modules:
//! - circuit: section primitives, planning, assembly, loop closure, repair, smoothing, retries
//! - scatter: track-side tree placement with clearance rejection
//! - track: the published track with checkpoints, start grid, and lap queries
//!
//! All coordinates live in the horizontal plane: `Vec2::x` is world x and
//! `Vec2::y` is world z. Elevation is exposed only through
//! [`Track::terrain_height`](crate::track::Track::terrain_height).
pub mod circuit;
pub mod error;
pub mod scatter;
pub mod track;

mod sampling;

/// Convenient re-exports for common types. Import with `use track_forge::prelude::*;`.
pub mod prelude {
    pub use crate::circuit::generator::{CircuitGenerator, GenerationReport, GeneratorConfig};
    pub use crate::circuit::section::{Direction, Pose, Section};
    pub use crate::circuit::validate::QualityReport;
    pub use crate::error::{Error, Result};
    pub use crate::scatter::fill::FillStrategy;
    pub use crate::scatter::{scatter_trees, Tree, TreeScatterConfig};
    pub use crate::track::{Checkpoint, Track, TrackConfig};
}
