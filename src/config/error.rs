//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Email domain must not contain '@'")]
    InvalidEmailDomain,

    #[error("Minimum password length must be between 1 and 128")]
    InvalidPasswordLength,

    #[error("Watch buffer must be between 1 and 10000")]
    InvalidWatchBuffer,

    #[error("Store latency must not exceed 60000 ms")]
    LatencyTooLarge,
}
