//! Weighted scoring of a feature vector.
//!
//! Each feature is mapped onto [0, 1] and multiplied by its weight; the
//! weights add up to 100 so the sum is already a percentage.

use serde::{Deserialize, Serialize};

use super::{Feature, FeatureVector};
use crate::domain::foundation::Percentage;

impl Feature {
    /// Points this feature contributes at full strength.
    pub fn weight(&self) -> f64 {
        match self {
            Feature::EmotionalRisk => 40.0,
            Feature::TimeOfDayRisk => 15.0,
            Feature::CalorieDeviation => 20.0,
            Feature::PriceDeviation => 15.0,
            Feature::PastNegativeOutcomes => 10.0,
        }
    }

    /// Maps a feature value onto [0, 1]. Ordering below the usual baseline
    /// carries no regret, so negative deviations count as zero.
    fn strength(&self, value: f64) -> f64 {
        match self {
            Feature::CalorieDeviation | Feature::PriceDeviation => value.max(0.0),
            _ => value,
        }
        .clamp(0.0, 1.0)
    }
}

/// Points one feature added to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub feature: Feature,
    pub points: f64,
}

/// The score and the per-feature contributions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// In [`Feature::ALL`] order.
    pub contributions: Vec<Contribution>,
    pub raw_total: f64,
    pub score: Percentage,
}

impl ScoreBreakdown {
    pub fn points(&self, feature: Feature) -> f64 {
        self.contributions
            .iter()
            .find(|c| c.feature == feature)
            .map(|c| c.points)
            .unwrap_or(0.0)
    }

    /// Contributions from largest to smallest; equal points keep
    /// [`Feature::ALL`] order.
    pub fn ranked(&self) -> Vec<Contribution> {
        let mut ranked = self.contributions.clone();
        ranked.sort_by(|a, b| b.points.total_cmp(&a.points));
        ranked
    }
}

/// Combines features into a 0-100 score.
pub struct RegretScorer;

impl RegretScorer {
    pub fn score(features: &FeatureVector) -> ScoreBreakdown {
        let contributions: Vec<Contribution> = Feature::ALL
            .iter()
            .map(|&feature| Contribution {
                feature,
                points: feature.weight() * feature.strength(features.value(feature)),
            })
            .collect();

        let raw_total: f64 = contributions.iter().map(|c| c.points).sum();

        ScoreBreakdown {
            contributions,
            raw_total,
            score: Percentage::from_rounded(raw_total),
        }
    }
}
