//! RegretPrediction - the engine's output contract.

use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::domain::foundation::Percentage;

/// Below this confidence a low-risk result carries no useful signal.
pub const SUPPRESSION_CONFIDENCE_FLOOR: u8 = 50;

/// Risk assessment for one pending order.
///
/// Built fresh by each evaluation and read-only afterwards. Serialises as
/// `{ riskLevel, riskScore, confidence, reasons, suggestions }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegretPrediction {
    risk_level: RiskLevel,
    risk_score: Percentage,
    confidence: Percentage,
    reasons: Vec<String>,
    suggestions: Vec<String>,
}

impl RegretPrediction {
    pub(crate) fn new(
        risk_level: RiskLevel,
        risk_score: Percentage,
        confidence: Percentage,
        reasons: Vec<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            risk_level,
            risk_score,
            confidence,
            reasons,
            suggestions,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn risk_score(&self) -> Percentage {
        self.risk_score
    }

    pub fn confidence(&self) -> Percentage {
        self.confidence
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Whether the presentation layer should show this result at all.
    ///
    /// A low-risk result with confidence under 50 is treated as "no signal".
    pub fn is_actionable(&self) -> bool {
        !(self.risk_level == RiskLevel::Low
            && self.confidence.value() < SUPPRESSION_CONFIDENCE_FLOOR)
    }
}
