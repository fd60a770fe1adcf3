//! Constraint mode toggles
//!
//! Two global switches control the separation checker: self-separation keeps
//! repeated occurrences of one item apart, pairwise separation honors the
//! declared exclusions between different items.

use serde::{Deserialize, Serialize};

/// Which constraint mode a toggle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Occurrences of the same item must not be adjacent
    #[serde(rename = "self")]
    SelfSeparation,
    /// Declared separation pairs must not be adjacent
    Pairwise,
}

/// The pair of constraint switches read at the start of each engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintModes {
    #[serde(rename = "self", default)]
    pub self_separation: bool,
    #[serde(default)]
    pub pairwise: bool,
}

impl ConstraintModes {
    pub fn new(self_separation: bool, pairwise: bool) -> Self {
        Self {
            self_separation,
            pairwise,
        }
    }

    /// Check if any constraint is enforced
    pub fn is_active(&self) -> bool {
        self.self_separation || self.pairwise
    }

    /// Toggle one mode
    pub fn set(&mut self, kind: ConstraintKind, enabled: bool) {
        match kind {
            ConstraintKind::SelfSeparation => self.self_separation = enabled,
            ConstraintKind::Pairwise => self.pairwise = enabled,
        }
    }

    pub fn get(&self, kind: ConstraintKind) -> bool {
        match kind {
            ConstraintKind::SelfSeparation => self.self_separation,
            ConstraintKind::Pairwise => self.pairwise,
        }
    }
}
