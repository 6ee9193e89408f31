//! Error types for compscope

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompscopeError {
    // Subject property errors
    #[error("Invalid subject property field {field}: {reason}")]
    InvalidSubject { field: String, reason: String },

    #[error("Invalid coordinates ({lat}, {lng}): {reason}")]
    InvalidCoordinates { lat: f64, lng: f64, reason: String },

    // Filter errors
    #[error("Invalid date range [{start}, {end}]: start must not exceed end")]
    InvalidDateRange { start: i32, end: i32 },

    #[error("Unknown filter preset: {name}. Available: starter, luxury, fixers, cashflow")]
    UnknownPreset { name: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CompscopeError {
    fn from(err: serde_json::Error) -> Self {
        CompscopeError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompscopeError>;
