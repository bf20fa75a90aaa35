//! Tunable engine settings.
//!
//! Every field has a default so a configuration source only needs to name
//! the values it overrides.

use serde::{Deserialize, Serialize};

use super::{EmotionalWeightTable, RiskThresholds, TimeOfDayWeightTable};
use crate::domain::foundation::ValidationError;

/// Default number of most recent orders considered.
pub const DEFAULT_HISTORY_WINDOW_SIZE: usize = 20;

/// Default minimum contribution (in score points) that earns a reason.
pub const DEFAULT_REASON_MIN_CONTRIBUTION: u32 = 5;

/// Divisors that normalise raw deviations into [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviationScales {
    /// Calories above the daily baseline that count as a full deviation.
    pub calories: f64,
    /// Price above the usual order total that counts as a full deviation.
    pub price: f64,
}

impl Default for DeviationScales {
    fn default() -> Self {
        Self {
            calories: 1000.0,
            price: 20.0,
        }
    }
}

impl DeviationScales {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("deviation_scales.calories", self.calories),
            ("deviation_scales.price", self.price),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("scale must be positive, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// Feature levels at which a suggestion is offered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionTriggers {
    pub emotional_weight: f64,
    pub time_of_day_weight: f64,
    pub calorie_deviation: f64,
    pub price_deviation: f64,
    pub negative_outcome_rate: f64,
    /// Relevant past orders needed before the past-outcome suggestion fires.
    pub min_relevant_orders: usize,
}

impl Default for SuggestionTriggers {
    fn default() -> Self {
        Self {
            emotional_weight: 0.6,
            time_of_day_weight: 0.75,
            calorie_deviation: 0.5,
            price_deviation: 0.5,
            negative_outcome_rate: 0.4,
            min_relevant_orders: 3,
        }
    }
}

impl SuggestionTriggers {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("suggestion_triggers.emotional_weight", self.emotional_weight),
            ("suggestion_triggers.time_of_day_weight", self.time_of_day_weight),
            ("suggestion_triggers.calorie_deviation", self.calorie_deviation),
            ("suggestion_triggers.price_deviation", self.price_deviation),
            (
                "suggestion_triggers.negative_outcome_rate",
                self.negative_outcome_rate,
            ),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("trigger must be within [0, 1], got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// All knobs of the regret engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegretEngineConfig {
    pub emotional_weights: EmotionalWeightTable,
    pub time_of_day_weights: TimeOfDayWeightTable,
    pub history_window_size: usize,
    pub risk_thresholds: RiskThresholds,
    pub reason_min_contribution: u32,
    pub deviation_scales: DeviationScales,
    pub suggestion_triggers: SuggestionTriggers,
}

impl Default for RegretEngineConfig {
    fn default() -> Self {
        Self {
            emotional_weights: EmotionalWeightTable::default(),
            time_of_day_weights: TimeOfDayWeightTable::default(),
            history_window_size: DEFAULT_HISTORY_WINDOW_SIZE,
            risk_thresholds: RiskThresholds::default(),
            reason_min_contribution: DEFAULT_REASON_MIN_CONTRIBUTION,
            deviation_scales: DeviationScales::default(),
            suggestion_triggers: SuggestionTriggers::default(),
        }
    }
}

impl RegretEngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.emotional_weights.validate()?;
        self.time_of_day_weights.validate()?;
        if self.history_window_size == 0 {
            return Err(ValidationError::out_of_range(
                "history_window_size",
                1,
                i32::MAX,
                0,
            ));
        }
        self.risk_thresholds.validate()?;
        if self.reason_min_contribution > 100 {
            return Err(ValidationError::out_of_range(
                "reason_min_contribution",
                0,
                100,
                i32::try_from(self.reason_min_contribution).unwrap_or(i32::MAX),
            ));
        }
        self.deviation_scales.validate()?;
        self.suggestion_triggers.validate()
    }
}
