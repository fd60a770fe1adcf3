//! Sequencing engine.
//!
//! Data flows: contents + modes -> pool builder -> sequencer (separation
//! checker + rating per candidate slot) -> sequence + remainder buckets ->
//! requeue loop -> summary.

pub mod pool;
pub mod rating;
pub mod separation;
pub mod sequencer;
pub mod summary;

pub use pool::build_pool;
pub use rating::{aggregate, rate};
pub use separation::{ViolationCode, check};
pub use sequencer::{DEFAULT_RETRY_BUDGET, PassReport, RemainderBuckets, Sequencer, SequencerOutcome};
pub use summary::{ComputeOptions, Occurrence, SequenceSummary, compute, occurrences};
