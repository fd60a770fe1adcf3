//! Error types for Playlistr
//!
//! Centralized error handling using thiserror. The sequencing engine itself
//! never fails; these errors come from catalog edits, validation,
//! persistence and configuration.

use thiserror::Error;

/// All error types that can occur in Playlistr
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Content not present in the catalog
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    /// A content with the same (normalized) name already exists
    #[error("Duplicate content: {0}")]
    DuplicateContent(String),

    /// Content values break a catalog invariant
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Playlistr operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
