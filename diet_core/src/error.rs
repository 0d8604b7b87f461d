//! Error types for the diet_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for diet_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference dataset could not be loaded
    #[error("Food catalog error: {0}")]
    Catalog(String),

    /// Numeric input out of range, non-finite, or otherwise unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid activity level: {0:?} (expected sedentary, light, moderate or active)")]
    InvalidActivityLevel(String),

    #[error("Invalid goal: {0:?} (expected weight-loss, maintenance or muscle-gain)")]
    InvalidGoal(String),

    #[error("Invalid gender: {0:?} (expected male or female)")]
    InvalidGender(String),
}
