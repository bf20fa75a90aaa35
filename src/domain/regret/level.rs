//! Risk levels and the thresholds that bucket a score into them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Percentage, ValidationError};

/// Coarse risk bucket shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Score boundaries: `score < low` is Low, `score >= high` is High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low: u8,
    pub high: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { low: 30, high: 65 }
    }
}

impl RiskThresholds {
    /// Maps a score to its bucket. Monotonic in `score`.
    pub fn bucket(&self, score: Percentage) -> RiskLevel {
        let value = score.value();
        if value < self.low {
            RiskLevel::Low
        } else if value < self.high {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.high > 100 {
            return Err(ValidationError::out_of_range(
                "risk_thresholds.high",
                1,
                100,
                i32::from(self.high),
            ));
        }
        if self.low == 0 || self.low >= self.high {
            return Err(ValidationError::invalid_format(
                "risk_thresholds",
                format!(
                    "expected 0 < low < high, got low={} high={}",
                    self.low, self.high
                ),
            ));
        }
        Ok(())
    }
}
