//! Separation checker.
//!
//! Classifies whether inserting a content into a candidate slot would put it
//! next to an occurrence of itself or next to an item it is separated from.

use serde::{Deserialize, Serialize};

use crate::domain::{Content, ConstraintModes};

/// Outcome of checking one candidate slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Slot is valid
    None,
    /// A neighbor is another occurrence of the same item
    SelfOnly,
    /// A neighbor is an item this content is separated from
    ExtOnly,
    /// Both kinds at once
    Both,
}

impl ViolationCode {
    fn from_flags(self_hit: bool, ext_hit: bool) -> Self {
        match (self_hit, ext_hit) {
            (false, false) => ViolationCode::None,
            (true, false) => ViolationCode::SelfOnly,
            (false, true) => ViolationCode::ExtOnly,
            (true, true) => ViolationCode::Both,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ViolationCode::None)
    }
}

/// Check slot `index` of `sequence` for `candidate`.
///
/// Slot `index` sits between `sequence[index]` and `sequence[(index + 1) % len]`.
/// An empty sequence has no neighbors and always yields `None`.
pub fn check(candidate: &Content, index: usize, sequence: &[&Content], modes: ConstraintModes) -> ViolationCode {
    if !modes.is_active() || sequence.is_empty() {
        return ViolationCode::None;
    }

    let left = sequence[index];
    let right = sequence[(index + 1) % sequence.len()];
    let neighbors = [left, right];

    let ext_hit = modes.pairwise
        && neighbors
            .iter()
            .any(|n| n.name != candidate.name && candidate.is_separated_from(&n.name));

    let self_hit = modes.self_separation && neighbors.iter().any(|n| n.name == candidate.name);

    ViolationCode::from_flags(self_hit, ext_hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: ConstraintModes = ConstraintModes {
        self_separation: true,
        pairwise: true,
    };

    #[test]
    fn test_modes_off_always_valid() {
        let a = Content::new("a", 1.0, 2).with_separation(["b"]);
        let b = Content::new("b", 1.0, 1);
        let seq = vec![&a, &b];
        for index in 0..seq.len() {
            assert_eq!(check(&a, index, &seq, ConstraintModes::default()), ViolationCode::None);
        }
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let a = Content::new("a", 1.0, 1);
        assert_eq!(check(&a, 0, &[], BOTH), ViolationCode::None);
    }

    #[test]
    fn test_self_violation() {
        let a = Content::new("a", 1.0, 2);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);
        let seq = vec![&a, &b, &c];
        let modes = ConstraintModes::new(true, false);

        // between A and B
        assert_eq!(check(&a, 0, &seq, modes), ViolationCode::SelfOnly);
        // between B and C
        assert_eq!(check(&a, 1, &seq, modes), ViolationCode::None);
        // between C and A (wraps)
        assert_eq!(check(&a, 2, &seq, modes), ViolationCode::SelfOnly);
    }

    #[test]
    fn test_ext_violation() {
        let a = Content::new("a", 1.0, 1).with_separation(["c"]);
        let b = Content::new("b", 1.0, 1);
        let c = Content::new("c", 1.0, 1);
        let d = Content::new("d", 1.0, 1);
        let seq = vec![&b, &c, &d];
        let modes = ConstraintModes::new(false, true);

        assert_eq!(check(&a, 0, &seq, modes), ViolationCode::ExtOnly);
        assert_eq!(check(&a, 1, &seq, modes), ViolationCode::ExtOnly);
        assert_eq!(check(&a, 2, &seq, modes), ViolationCode::None);
    }

    #[test]
    fn test_ext_ignores_own_name() {
        let a = Content::new("a", 1.0, 2);
        let mut self_listed = a.clone();
        self_listed.separation.insert("A".to_string());
        let seq = vec![&a];
        assert_eq!(check(&self_listed, 0, &seq, ConstraintModes::new(false, true)), ViolationCode::None);
    }

    #[test]
    fn test_both_violation() {
        let a = Content::new("a", 1.0, 2).with_separation(["b"]);
        let b = Content::new("b", 1.0, 1);
        let seq = vec![&a, &b];
        assert_eq!(check(&a, 0, &seq, BOTH), ViolationCode::Both);
    }

    #[test]
    fn test_single_element_wraps_to_itself() {
        let a = Content::new("a", 1.0, 2);
        let seq = vec![&a];
        assert_eq!(check(&a, 0, &seq, ConstraintModes::new(true, false)), ViolationCode::SelfOnly);
    }

    #[test]
    fn test_asymmetric_declaration_only_binds_declarer() {
        let a = Content::new("a", 1.0, 1).with_separation(["b"]);
        let b = Content::new("b", 1.0, 1);
        let modes = ConstraintModes::new(false, true);
        assert_eq!(check(&b, 0, &[&a], modes), ViolationCode::None);
        assert_eq!(check(&a, 0, &[&b], modes), ViolationCode::ExtOnly);
    }
}
