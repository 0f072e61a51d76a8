//! Error types for the rehab_core library.

use crate::ItemKind;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for rehab_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Seed data failed validation
    #[error("Seed validation error: {0}")]
    SeedValidation(String),

    /// No schedule item with this id
    #[error("No schedule item with id '{id}'")]
    NotFound { id: String },

    /// The id names an item of the other kind
    #[error("Item '{id}' has kind {found}, expected {expected}")]
    KindMismatch {
        id: String,
        expected: ItemKind,
        found: ItemKind,
    },

    /// Period rollover rejected
    #[error("Period error: {0}")]
    Period(String),

    /// Applying the delta would overflow the points total
    #[error("Points total {total} cannot absorb {delta:+}")]
    PointsOverflow { total: i64, delta: i64 },
}
