//! Insertion-evaluation-decision engine with requeue loop.
//!
//! Each pass walks the pool in order. For every entry the engine tries every
//! slot of the sequence built so far, discards slots the separation checker
//! rejects, rates the rest and commits the best one immediately. Entries with
//! no valid slot land in a remainder bucket keyed by the violation seen at the
//! last slot examined. Buckets are fed back as the next pool (pairwise first,
//! then both, then self) until everything is placed or the retry budget runs
//! out. Whatever is still pending at that point is dropped.

use serde::{Deserialize, Serialize};

use crate::domain::{Content, ConstraintModes};
use crate::engine::rating::rate;
use crate::engine::separation::{ViolationCode, check};

/// Number of passes when no budget is configured.
pub const DEFAULT_RETRY_BUDGET: u32 = 30;

/// Items deferred during one pass, by violation kind
#[derive(Debug, Default)]
pub struct RemainderBuckets<'a> {
    self_only: Vec<&'a Content>,
    ext_only: Vec<&'a Content>,
    both: Vec<&'a Content>,
}

impl<'a> RemainderBuckets<'a> {
    /// File a deferred item. `ViolationCode::None` is never deferred.
    pub fn push(&mut self, code: ViolationCode, content: &'a Content) {
        match code {
            ViolationCode::SelfOnly => self.self_only.push(content),
            ViolationCode::ExtOnly => self.ext_only.push(content),
            ViolationCode::Both => self.both.push(content),
            ViolationCode::None => {}
        }
    }

    pub fn len(&self) -> usize {
        self.self_only.len() + self.ext_only.len() + self.both.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next pass pool: pairwise-only, then both, then self-only.
    pub fn into_pool(self) -> Vec<&'a Content> {
        let mut pool = self.ext_only;
        pool.extend(self.both);
        pool.extend(self.self_only);
        pool
    }
}

/// What happened during one pass over the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: u32,
    /// Entries placed during this pass
    pub placed: usize,
    pub self_only: usize,
    pub ext_only: usize,
    pub both: usize,
    /// Sequence length at the end of the pass
    pub sequence_len: usize,
}

impl PassReport {
    pub fn deferred(&self) -> usize {
        self.self_only + self.ext_only + self.both
    }
}

/// Result of one engine run
#[derive(Debug)]
pub struct SequencerOutcome<'a> {
    /// The final sequence
    pub sequence: Vec<&'a Content>,
    /// Entries still unplaced when the run stopped
    pub dropped: Vec<&'a Content>,
    /// One report per pass
    pub passes: Vec<PassReport>,
}

/// Per-entry decision
#[derive(Debug, Clone, Copy, PartialEq)]
enum Decision {
    /// Insert at this position
    Insert(usize),
    /// Sequence is empty, take the first spot
    Append,
    /// No valid slot; file under the last violation seen
    Defer(ViolationCode),
}

/// The sequencing engine
#[derive(Debug, Clone)]
pub struct Sequencer {
    modes: ConstraintModes,
    retry_budget: u32,
}

impl Sequencer {
    pub fn new(modes: ConstraintModes) -> Self {
        Self {
            modes,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Set the maximum number of passes. The first pass always runs.
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Pick a slot for `content` in `sequence`.
    ///
    /// Slot `i` lies after `sequence[i]`; the best slot is the lowest-rated
    /// valid one, earliest on ties.
    fn decide(&self, content: &Content, sequence: &[&Content]) -> Decision {
        if sequence.is_empty() {
            return Decision::Append;
        }

        let mut best: Option<(usize, f64)> = None;
        let mut last_code = ViolationCode::None;
        let mut candidate: Vec<&Content> = Vec::with_capacity(sequence.len() + 1);

        for index in 0..sequence.len() {
            last_code = check(content, index, sequence, self.modes);
            if !last_code.is_none() {
                continue;
            }

            candidate.clear();
            candidate.extend_from_slice(sequence);
            candidate.insert(index + 1, content);

            let rating = rate(&candidate);
            if best.is_none_or(|(_, best_rating)| rating < best_rating) {
                best = Some((index + 1, rating));
            }
        }

        match best {
            Some((position, _)) => Decision::Insert(position),
            None => Decision::Defer(last_code),
        }
    }

    /// Run passes over `pool` until it drains or the budget is spent.
    pub fn run<'a>(&self, mut pool: Vec<&'a Content>) -> SequencerOutcome<'a> {
        let mut sequence: Vec<&'a Content> = Vec::with_capacity(pool.len());
        let mut passes = Vec::new();
        let mut budget = self.retry_budget.max(1);
        let mut pass = 0;

        loop {
            pass += 1;
            let mut buckets = RemainderBuckets::default();
            let mut placed = 0;

            for content in pool {
                match self.decide(content, &sequence) {
                    Decision::Insert(position) => {
                        sequence.insert(position, content);
                        placed += 1;
                    }
                    Decision::Append => {
                        sequence.push(content);
                        placed += 1;
                    }
                    Decision::Defer(code) => buckets.push(code, content),
                }
            }

            budget -= 1;

            let report = PassReport {
                pass,
                placed,
                self_only: buckets.self_only.len(),
                ext_only: buckets.ext_only.len(),
                both: buckets.both.len(),
                sequence_len: sequence.len(),
            };
            log::debug!(
                "Pass {}: placed {}, deferred {} (self {}, pairwise {}, both {}), sequence length {}",
                report.pass,
                report.placed,
                report.deferred(),
                report.self_only,
                report.ext_only,
                report.both,
                report.sequence_len
            );
            passes.push(report);

            pool = buckets.into_pool();
            if budget == 0 || pool.is_empty() {
                break;
            }
        }

        if !pool.is_empty() {
            log::warn!(
                "Retry budget exhausted after {} passes, dropping {} unplaced entries",
                passes.len(),
                pool.len()
            );
        }

        SequencerOutcome {
            sequence,
            dropped: pool,
            passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pool::build_pool;
    use rand::{SeedableRng, rngs::StdRng};

    fn names<'a>(sequence: &[&'a Content]) -> Vec<&'a str> {
        sequence.iter().map(|c| c.name.as_str()).collect()
    }

    fn has_circular_self_adjacency(sequence: &[&Content]) -> bool {
        let len = sequence.len();
        len >= 2 && (0..len).any(|i| sequence[i].name == sequence[(i + 1) % len].name)
    }

    #[test]
    fn test_empty_pool() {
        let outcome = Sequencer::new(ConstraintModes::default()).run(vec![]);
        assert!(outcome.sequence.is_empty());
        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.passes.len(), 1);
    }

    #[test]
    fn test_buckets_requeue_order() {
        let a = Content::new("a", 1.0, 1);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);

        let mut buckets = RemainderBuckets::default();
        buckets.push(ViolationCode::SelfOnly, &a);
        buckets.push(ViolationCode::Both, &c);
        buckets.push(ViolationCode::ExtOnly, &b);
        buckets.push(ViolationCode::None, &a);
        assert_eq!(buckets.len(), 3);

        assert_eq!(names(&buckets.into_pool()), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_decide_empty_sequence_appends() {
        let a = Content::new("a", 1.0, 1);
        let sequencer = Sequencer::new(ConstraintModes::new(true, true));
        assert_eq!(sequencer.decide(&a, &[]), Decision::Append);
    }

    #[test]
    fn test_decide_ties_keep_first_slot() {
        let a = Content::new("a", 1.0, 1);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);
        let sequencer = Sequencer::new(ConstraintModes::default());

        // Every arrangement of three distinct items rates 0
        assert_eq!(sequencer.decide(&c, &[&a, &b]), Decision::Insert(1));
    }

    #[test]
    fn test_decide_picks_lowest_rating() {
        let a = Content::new("a", 1.0, 2);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);
        let sequencer = Sequencer::new(ConstraintModes::default());

        // [A, B, C]: slot 1 gives [A, B, A, C], the only perfectly spread option
        assert_eq!(sequencer.decide(&a, &[&a, &b, &c]), Decision::Insert(2));
    }

    #[test]
    fn test_decide_skips_invalid_slots() {
        let a = Content::new("a", 1.0, 2);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1).with_separation(["b"]);
        let sequencer = Sequencer::new(ConstraintModes::new(false, true));

        // [A, A, B]: slot 0 is A|A, slot 1 is A|B, slot 2 is B|A
        assert_eq!(sequencer.decide(&c, &[&a, &a, &b]), Decision::Insert(1));
    }

    #[test]
    fn test_decide_defers_with_last_violation() {
        let x = Content::new("x", 1.0, 2).with_separation(["b"]);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);
        let sequencer = Sequencer::new(ConstraintModes::new(true, true));

        // [X, C, B]: X|C self, C|B ext, B|X both
        assert_eq!(
            sequencer.decide(&x, &[&x, &c, &b]),
            Decision::Defer(ViolationCode::Both)
        );
        // [X, B, C]: X|B both, B|C ext, C|X self
        assert_eq!(
            sequencer.decide(&x, &[&x, &b, &c]),
            Decision::Defer(ViolationCode::SelfOnly)
        );
    }

    #[test]
    fn test_modes_off_places_everything_in_one_pass() {
        let contents = vec![Content::new("a", 10.0, 2), Content::new("b", 5.0, 1)];

        for seed in 0..20 {
            let pool = build_pool(&contents, &mut StdRng::seed_from_u64(seed));
            let outcome = Sequencer::new(ConstraintModes::default()).with_retry_budget(1).run(pool);

            assert_eq!(outcome.sequence.len(), 3);
            assert_eq!(outcome.passes.len(), 1);
            assert!(outcome.dropped.is_empty());
            let seq = names(&outcome.sequence);
            assert_eq!(seq.iter().filter(|n| **n == "A").count(), 2);
            assert_eq!(seq.iter().filter(|n| **n == "B").count(), 1);
        }
    }

    #[test]
    fn test_self_mode_three_slot_circle_drops_one() {
        // In a circle of three every position touches the other two, so two
        // A occurrences can never be kept apart.
        let contents = vec![Content::new("a", 10.0, 2), Content::new("b", 5.0, 1)];

        for seed in 0..20 {
            let pool = build_pool(&contents, &mut StdRng::seed_from_u64(seed));
            let outcome = Sequencer::new(ConstraintModes::new(true, false)).run(pool);

            assert_eq!(outcome.sequence.len(), 2);
            assert!(!has_circular_self_adjacency(&outcome.sequence));
            assert_eq!(names(&outcome.dropped), vec!["A"]);
        }
    }

    #[test]
    fn test_self_mode_spaces_repeats() {
        let contents = vec![
            Content::new("a", 1.0, 3),
            Content::new("b", 1.0, 2),
            Content::new("c", 1.0, 2),
            Content::new("d", 1.0, 1),
        ];

        for seed in 0..20 {
            let pool = build_pool(&contents, &mut StdRng::seed_from_u64(seed));
            let outcome = Sequencer::new(ConstraintModes::new(true, false)).run(pool);
            assert!(!has_circular_self_adjacency(&outcome.sequence));
        }
    }

    #[test]
    fn test_pairwise_unsatisfiable_exhausts_budget() {
        let contents = vec![
            Content::new("a", 1.0, 1).with_separation(["b"]),
            Content::new("b", 1.0, 1).with_separation(["a"]),
        ];
        let pool = build_pool(&contents, &mut StdRng::seed_from_u64(3));
        let outcome = Sequencer::new(ConstraintModes::new(false, true)).run(pool);

        assert_eq!(outcome.sequence.len(), 1);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.passes.len(), DEFAULT_RETRY_BUDGET as usize);
        assert!(outcome.passes.iter().all(|p| p.ext_only == 1));
    }

    #[test]
    fn test_requeue_places_deferred_entries() {
        let contents = vec![Content::new("a", 1.0, 2), Content::new("b", 1.0, 1), Content::new("c", 1.0, 1)];
        let (a, b, c) = (&contents[0], &contents[1], &contents[2]);

        // Second A is deferred until B and C are in place.
        let outcome = Sequencer::new(ConstraintModes::new(true, false)).run(vec![a, a, b, c]);

        assert_eq!(outcome.passes.len(), 2);
        assert_eq!(outcome.passes[0].self_only, 1);
        assert_eq!(outcome.passes[1].placed, 1);
        assert_eq!(outcome.sequence.len(), 4);
        assert!(!has_circular_self_adjacency(&outcome.sequence));
    }

    #[test]
    fn test_zero_budget_still_runs_once() {
        let a = Content::new("a", 1.0, 1);
        let outcome = Sequencer::new(ConstraintModes::default()).with_retry_budget(0).run(vec![&a]);
        assert_eq!(outcome.sequence.len(), 1);
        assert_eq!(outcome.passes.len(), 1);
    }
}
