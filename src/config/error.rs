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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid engine setting: {0}")]
    Engine(#[from] crate::domain::foundation::ValidationError),

    #[error("History fetch timeout must be between 1 and {max} ms, got {actual}")]
    InvalidFetchTimeout { actual: u64, max: u64 },

    #[error("History store directory must not be empty")]
    EmptyStoreDir,
}
