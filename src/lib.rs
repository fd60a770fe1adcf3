//! Playlistr - constraint-aware playlist sequencing
//!
//! Playlistr arranges weighted, repeatable contents into one circular
//! playlist. Every content appears as often as its saturation asks, repeats
//! are spread as evenly as the other contents' durations allow, and declared
//! adjacency exclusions are honored. Contents that cannot be placed within
//! the retry budget are dropped rather than reported as errors.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod storage;

pub use catalog::Catalog;
pub use domain::{ConstraintKind, ConstraintModes, Content};
pub use engine::{ComputeOptions, SequenceSummary, compute};
pub use error::{PlaylistError, Result};
pub use graph::{AdjacencyView, compute_adjacency_view};
