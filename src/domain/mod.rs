//! Domain types for Playlistr
//!
//! - Content: a named, weighted, repeatable item with its separation rules
//! - ConstraintModes: the self/pairwise separation switches

pub mod content;
pub mod modes;

pub use content::{Content, DEFAULT_COLOR, normalize_name, random_color};
pub use modes::{ConstraintKind, ConstraintModes};
