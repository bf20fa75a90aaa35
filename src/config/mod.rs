//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Every value has a default; an optional file and
//! environment variables with the `REGRET_ENGINE_` prefix override them.
//! Nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use regret_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! let engine = config.build_engine().expect("Invalid configuration");
//!
//! println!("History window: {}", engine.config().history_window_size);
//! ```

mod error;
mod history;

pub use error::{ConfigError, ValidationError};
pub use history::{HistoryConfig, MAX_FETCH_TIMEOUT_MS};

use serde::Deserialize;
use std::path::Path;

use crate::domain::regret::{RegretEngine, RegretEngineConfig};

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "REGRET_ENGINE";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] (environment only) or
/// [`AppConfig::load_from_file()`] (file, then environment).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Regret engine tuning (weights, thresholds, window)
    #[serde(default)]
    pub engine: RegretEngineConfig,

    /// History store access (timeout, storage location)
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REGRET_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs, defaulting the rest
    ///
    /// # Environment Variable Format
    ///
    /// - `REGRET_ENGINE__ENGINE__HISTORY_WINDOW_SIZE=30` -> `engine.history_window_size = 30`
    /// - `REGRET_ENGINE__HISTORY__FETCH_TIMEOUT_MS=500` -> `history.fetch_timeout_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, then apply environment overrides
    ///
    /// The format (YAML, TOML, JSON) is taken from the file extension.
    /// Weight tables can only be overridden this way, since they are lists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__")
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for out-of-range weights, inverted
    /// thresholds, a zero history window or a bad fetch timeout.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.history.validate()?;
        Ok(())
    }

    /// Validate and build the regret engine
    pub fn build_engine(&self) -> Result<RegretEngine, ConfigError> {
        self.validate()?;
        RegretEngine::new(self.engine.clone()).map_err(|e| {
            ConfigError::ValidationFailed(ValidationError::Engine(e.validation().clone()))
        })
    }
}
