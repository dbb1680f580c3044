//! Core error types for meetkit-core.
//!
//! Timestamp parsing never appears here: the lenient parser in
//! [`crate::time`] resolves every failure to the current instant.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for meetkit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Fixture loading errors
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lookup of an unknown meeting identifier
    #[error("Meeting not found: {id}")]
    MeetingNotFound { id: String },

    /// Request that is well-formed JSON but semantically unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A writer panicked while holding the store lock
    #[error("Meeting store lock poisoned")]
    StorePoisoned,

    /// Duration or instant arithmetic outside the representable range
    #[error("Time out of range: {0}")]
    TimeOutOfRange(String),
}

/// Fixture-specific errors.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Fixture file could not be read
    #[error("Failed to read fixture at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not a valid dataset document
    #[error("Failed to parse fixture at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No home directory to place the config file in
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoreError::StorePoisoned
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
