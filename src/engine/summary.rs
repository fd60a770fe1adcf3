//! Compute entry point and display summary.

use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::domain::{Content, ConstraintModes};
use crate::engine::pool::build_pool;
use crate::engine::rating::rate;
use crate::engine::sequencer::{DEFAULT_RETRY_BUDGET, PassReport, Sequencer};

/// Inputs of one compute run besides the content list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeOptions {
    pub modes: ConstraintModes,
    pub retry_budget: u32,
    /// Fixed shuffle seed; drawn at random when `None`
    pub seed: Option<u64>,
}

impl Default for ComputeOptions {
    fn default() -> Self {
        Self {
            modes: ConstraintModes::default(),
            retry_budget: DEFAULT_RETRY_BUDGET,
            seed: None,
        }
    }
}

impl ComputeOptions {
    pub fn new(modes: ConstraintModes) -> Self {
        Self {
            modes,
            ..Self::default()
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One slot of the final sequence, labelled for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub name: String,
    /// `NAME-k` where k counts previous occurrences of the same name
    pub label: String,
    pub duration: f64,
    pub color: String,
}

/// Result of a compute run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSummary {
    /// Seed the pool was shuffled with
    pub seed: u64,
    pub modes: ConstraintModes,
    /// Names in sequence order
    pub sequence: Vec<String>,
    pub occurrences: Vec<Occurrence>,
    /// Rating of the final sequence (lower is better)
    pub rating: f64,
    /// Sum of saturations over the input
    pub requested: usize,
    pub placed: usize,
    /// Entries left unplaced after the last pass
    pub dropped: Vec<String>,
    pub passes: Vec<PassReport>,
}

impl SequenceSummary {
    /// Check if every requested occurrence made it into the sequence
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Sum of durations over the sequence
    pub fn total_duration(&self) -> f64 {
        self.occurrences.iter().map(|o| o.duration).sum()
    }
}

/// Label every slot of `sequence` with its per-name occurrence index.
pub fn occurrences(sequence: &[&Content]) -> Vec<Occurrence> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    sequence
        .iter()
        .map(|content| {
            let count = seen.entry(content.name.as_str()).or_insert(0);
            let occurrence = Occurrence {
                name: content.name.clone(),
                label: format!("{}-{}", content.name, count),
                duration: content.duration,
                color: content.color.clone(),
            };
            *count += 1;
            occurrence
        })
        .collect()
}

/// Build the pool, run the engine and summarize the result.
///
/// `contents` is expected to have passed catalog validation; the engine does
/// not guard against zero saturations or duplicate names.
pub fn compute(contents: &[Content], options: &ComputeOptions) -> SequenceSummary {
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);

    let pool = build_pool(contents, &mut rng);
    let requested = pool.len();

    log::info!(
        "Computing sequence: {} contents, {} entries, seed {}, modes {:?}, budget {}",
        contents.len(),
        requested,
        seed,
        options.modes,
        options.retry_budget
    );

    let outcome = Sequencer::new(options.modes)
        .with_retry_budget(options.retry_budget)
        .run(pool);

    let summary = SequenceSummary {
        seed,
        modes: options.modes,
        sequence: outcome.sequence.iter().map(|c| c.name.clone()).collect(),
        occurrences: occurrences(&outcome.sequence),
        rating: rate(&outcome.sequence),
        requested,
        placed: outcome.sequence.len(),
        dropped: outcome.dropped.iter().map(|c| c.name.clone()).collect(),
        passes: outcome.passes,
    };

    log::info!(
        "Sequence computed: {}/{} placed in {} passes, rating {:.3}",
        summary.placed,
        summary.requested,
        summary.passes.len(),
        summary.rating
    );

    summary
}
