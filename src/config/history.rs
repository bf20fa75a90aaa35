//! History store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Longest fetch timeout accepted; checkout must not wait longer.
pub const MAX_FETCH_TIMEOUT_MS: u64 = 10_000;

/// History store configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// How long checkout waits for history before assessing as cold start
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Directory for YAML history files; in-memory store when unset
    pub store_dir: Option<PathBuf>,
}

impl HistoryConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Check if histories are kept on disk
    pub fn is_file_backed(&self) -> bool {
        self.store_dir.is_some()
    }

    /// Validate history configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fetch_timeout_ms == 0 || self.fetch_timeout_ms > MAX_FETCH_TIMEOUT_MS {
            return Err(ValidationError::InvalidFetchTimeout {
                actual: self.fetch_timeout_ms,
                max: MAX_FETCH_TIMEOUT_MS,
            });
        }
        if let Some(dir) = &self.store_dir {
            if dir.as_os_str().is_empty() {
                return Err(ValidationError::EmptyStoreDir);
            }
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            store_dir: None,
        }
    }
}

fn default_fetch_timeout_ms() -> u64 {
    250
}
