//! Content record and related helpers
//!
//! A Content is a named, weighted, repeatable unit to be sequenced. Names are
//! case-normalized so "jingle" and "JINGLE" refer to the same item.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PlaylistError, Result};

/// Color assigned when a content is built without one.
pub const DEFAULT_COLOR: &str = "#888888";

/// A named item with a duration weight and a required repetition count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Unique, uppercased identifier
    pub name: String,

    /// Positive weight of one occurrence in the sequence
    pub duration: f64,

    /// Number of times this item must appear in the sequence
    pub saturation: u32,

    /// Names this item must never sit directly next to
    #[serde(default)]
    pub separation: BTreeSet<String>,

    /// Display color (`#RRGGBB`), never used for sequencing. Empty when a
    /// deserialized record carried none.
    #[serde(default)]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Normalize a content name: surrounding whitespace trimmed, uppercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Generate a random `#RRGGBB` display color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06X}", rng.random_range(0..=0xFF_FFFFu32))
}

impl Content {
    /// Create a new content with no separation rules
    pub fn new(name: impl AsRef<str>, duration: f64, saturation: u32) -> Self {
        Self {
            name: normalize_name(name.as_ref()),
            duration,
            saturation,
            separation: BTreeSet::new(),
            color: default_color(),
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Add names this content must not be adjacent to
    pub fn with_separation<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.separation
            .extend(names.into_iter().map(|n| normalize_name(n.as_ref())));
        self
    }

    /// Check whether this content declares a separation from `name`
    pub fn is_separated_from(&self, name: &str) -> bool {
        self.separation.contains(name)
    }

    /// Check whether a display color has been assigned
    pub fn has_color(&self) -> bool {
        !self.color.is_empty()
    }

    /// Check the per-item invariants the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PlaylistError::InvalidContent("name must not be empty".to_string()));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(PlaylistError::InvalidContent(format!(
                "{}: duration must be a positive number, got {}",
                self.name, self.duration
            )));
        }
        if self.saturation == 0 {
            return Err(PlaylistError::InvalidContent(format!(
                "{}: saturation must be >= 1",
                self.name
            )));
        }
        if self.separation.contains(&self.name) {
            return Err(PlaylistError::InvalidContent(format!(
                "{}: cannot be separated from itself",
                self.name
            )));
        }
        Ok(())
    }
}
