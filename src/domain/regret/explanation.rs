//! Human-readable reasons and suggestions.
//!
//! Both lists are ordered by the contribution of the feature behind each
//! entry, largest first. Reasons follow the score; suggestions fire on
//! their own feature-level triggers.

use super::{Contribution, Feature, FeatureVector, RegretEngineConfig, RiskLevel, ScoreBreakdown};
use crate::domain::emotion::EmotionalSignal;

/// Builds the explanatory text for one evaluation.
pub struct Explainer<'a> {
    config: &'a RegretEngineConfig,
}

impl<'a> Explainer<'a> {
    pub fn new(config: &'a RegretEngineConfig) -> Self {
        Self { config }
    }

    /// One reason per feature contributing more than the configured minimum.
    ///
    /// A medium or high result always carries at least its top contributor.
    pub fn reasons(
        &self,
        breakdown: &ScoreBreakdown,
        features: &FeatureVector,
        level: RiskLevel,
        emotion: Option<&EmotionalSignal>,
    ) -> Vec<String> {
        let threshold = f64::from(self.config.reason_min_contribution);
        let ranked = breakdown.ranked();

        let mut selected: Vec<&Contribution> =
            ranked.iter().filter(|c| c.points > threshold).collect();
        if selected.is_empty() && level != RiskLevel::Low {
            selected.extend(ranked.first());
        }

        selected
            .into_iter()
            .map(|c| reason_text(c.feature, features, emotion))
            .collect()
    }

    /// Suggestions for every triggered feature. Without a captured signal the
    /// past-outcome suggestion does not refer to the user's mood.
    pub fn suggestions(
        &self,
        breakdown: &ScoreBreakdown,
        features: &FeatureVector,
        emotion: Option<&EmotionalSignal>,
    ) -> Vec<String> {
        breakdown
            .ranked()
            .iter()
            .filter(|c| self.triggers(c.feature, features))
            .map(|c| suggestion_text(c.feature, emotion.is_some()).to_string())
            .collect()
    }

    fn triggers(&self, feature: Feature, features: &FeatureVector) -> bool {
        let t = &self.config.suggestion_triggers;
        let value = features.value(feature);
        match feature {
            Feature::EmotionalRisk => value > 0.0 && value >= t.emotional_weight,
            Feature::TimeOfDayRisk => value > 0.0 && value >= t.time_of_day_weight,
            Feature::CalorieDeviation => value > 0.0 && value >= t.calorie_deviation,
            Feature::PriceDeviation => value > 0.0 && value >= t.price_deviation,
            Feature::PastNegativeOutcomes => {
                features.relevant_history_count >= t.min_relevant_orders
                    && value > 0.0
                    && value >= t.negative_outcome_rate
            }
        }
    }
}

fn reason_text(
    feature: Feature,
    features: &FeatureVector,
    emotion: Option<&EmotionalSignal>,
) -> String {
    match feature {
        Feature::EmotionalRisk => match emotion {
            Some(signal) if signal.intensity >= 4 => format!(
                "You're feeling very {} right now, and strong feelings often drive orders you regret later",
                signal.emotion.adjective()
            ),
            Some(signal) => format!(
                "You're feeling {} right now, which can make impulse orders more likely",
                signal.emotion.adjective()
            ),
            None => "Your current mood raises the chance of an impulse order".to_string(),
        },
        Feature::TimeOfDayRisk => match emotion {
            Some(signal) => format!(
                "It's {}, a time of day when orders are more often regretted",
                signal.time_of_day
            ),
            None => "Orders at this time of day are more often regretted".to_string(),
        },
        Feature::CalorieDeviation => match features.calorie_baseline {
            Some(baseline) => format!(
                "This order has significantly more calories than your typical day (about {} kcal)",
                baseline.round() as i64
            ),
            None => "This order has significantly more calories than your typical order".to_string(),
        },
        Feature::PriceDeviation => match features.price_baseline {
            Some(baseline) => format!(
                "This order costs noticeably more than your usual order (about {:.2})",
                baseline
            ),
            None => "This order costs noticeably more than your usual order".to_string(),
        },
        Feature::PastNegativeOutcomes => {
            let mood = emotion
                .map(|s| format!(" when feeling {}", s.emotion.adjective()))
                .unwrap_or_default();
            format!(
                "You regretted {} of your last {} similar orders{}",
                features.negative_outcome_count, features.relevant_history_count, mood
            )
        }
    }
}

fn suggestion_text(feature: Feature, mood_known: bool) -> &'static str {
    match feature {
        Feature::EmotionalRisk => {
            "Take a short break, a glass of water or a quick walk, and see if you still want this."
        }
        Feature::TimeOfDayRisk => "Late-night orders are often regretted. Consider saving this cart for the morning.",
        Feature::CalorieDeviation => "Consider a lighter option or sharing this order.",
        Feature::PriceDeviation => "This is pricier than usual. A smaller order might do.",
        Feature::PastNegativeOutcomes if mood_known => {
            "You've regretted similar orders before when feeling this way. Maybe wait 10 minutes before checking out."
        }
        Feature::PastNegativeOutcomes => {
            "You've regretted several recent orders. Maybe wait 10 minutes before checking out."
        }
    }
}
