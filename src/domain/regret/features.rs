//! Feature extraction - raw inputs to a fixed set of named numbers.
//!
//! Scoring only ever sees a [`FeatureVector`], so changes to the shape of
//! orders or history stay in this file.
//!
//! Every feature has a neutral value for missing data: no history means
//! zero deviation and a zero negative-outcome rate, and no emotional signal
//! means zero emotional and time-of-day weight.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::RegretEngineConfig;
use crate::domain::emotion::EmotionalSignal;
use crate::domain::history::HistoricalOrderRecord;
use crate::domain::order::OrderCandidate;

/// The five features the score is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    EmotionalRisk,
    TimeOfDayRisk,
    CalorieDeviation,
    PriceDeviation,
    PastNegativeOutcomes,
}

impl Feature {
    /// All features in their fixed tie-break order.
    pub const ALL: [Feature; 5] = [
        Feature::EmotionalRisk,
        Feature::TimeOfDayRisk,
        Feature::CalorieDeviation,
        Feature::PriceDeviation,
        Feature::PastNegativeOutcomes,
    ];
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Feature::EmotionalRisk => "emotional_risk",
            Feature::TimeOfDayRisk => "time_of_day_risk",
            Feature::CalorieDeviation => "calorie_deviation",
            Feature::PriceDeviation => "price_deviation",
            Feature::PastNegativeOutcomes => "past_negative_outcomes",
        };
        write!(f, "{}", s)
    }
}

/// Extracted features plus the evidence behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// [0, 1]
    pub emotional_risk_weight: f64,
    /// [0, 1]
    pub time_of_day_risk_weight: f64,
    /// [-1, 1]
    pub calorie_deviation: f64,
    /// [-1, 1]
    pub price_deviation: f64,
    /// [0, 1]
    pub past_negative_outcome_rate: f64,
    /// Window records matching the current emotion (`k`).
    pub relevant_history_count: usize,
    /// Negative outcomes among the relevant records.
    pub negative_outcome_count: usize,
    pub emotional_signal_present: bool,
    /// Average daily calories, if any consumed order was in the window.
    pub calorie_baseline: Option<f64>,
    /// Average order total, if any consumed order was in the window.
    pub price_baseline: Option<f64>,
}

impl FeatureVector {
    /// Returns the feature's value on its native scale.
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::EmotionalRisk => self.emotional_risk_weight,
            Feature::TimeOfDayRisk => self.time_of_day_risk_weight,
            Feature::CalorieDeviation => self.calorie_deviation,
            Feature::PriceDeviation => self.price_deviation,
            Feature::PastNegativeOutcomes => self.past_negative_outcome_rate,
        }
    }
}

/// Scales `delta` by `scale` and clamps into [-1, 1].
fn normalise(delta: f64, scale: f64) -> f64 {
    (delta / scale).clamp(-1.0, 1.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Turns an order, optional signal and history into a [`FeatureVector`].
pub struct FeatureExtractor<'a> {
    config: &'a RegretEngineConfig,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(config: &'a RegretEngineConfig) -> Self {
        Self { config }
    }

    /// The most recent `history_window_size` records, newest first.
    ///
    /// Sorting is stable so records sharing a timestamp keep caller order.
    pub fn window<'h>(
        &self,
        history: &'h [HistoricalOrderRecord],
    ) -> Vec<&'h HistoricalOrderRecord> {
        let mut recent: Vec<_> = history.iter().collect();
        recent.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        recent.truncate(self.config.history_window_size);
        recent
    }

    pub fn extract(
        &self,
        order: &OrderCandidate,
        emotion: Option<&EmotionalSignal>,
        history: &[HistoricalOrderRecord],
    ) -> FeatureVector {
        let window = self.window(history);

        let calorie_baseline = Self::daily_calorie_baseline(&window);
        let price_baseline = mean(
            window
                .iter()
                .filter(|r| r.was_consumed())
                .map(|r| r.total_price),
        );

        let calorie_deviation = calorie_baseline
            .map(|base| {
                normalise(
                    f64::from(order.total_calories) - base,
                    self.config.deviation_scales.calories,
                )
            })
            .unwrap_or(0.0);
        let price_deviation = price_baseline
            .map(|base| normalise(order.total_price - base, self.config.deviation_scales.price))
            .unwrap_or(0.0);

        let relevant: Vec<_> = window
            .iter()
            .filter(|r| Self::emotionally_similar(emotion, r))
            .collect();
        let negative_outcome_count = relevant.iter().filter(|r| r.outcome.is_negative()).count();
        let past_negative_outcome_rate = if relevant.is_empty() {
            0.0
        } else {
            negative_outcome_count as f64 / relevant.len() as f64
        };

        FeatureVector {
            emotional_risk_weight: emotion
                .map(|s| self.config.emotional_weights.weight(s.emotion, s.intensity))
                .unwrap_or(0.0),
            time_of_day_risk_weight: emotion
                .map(|s| self.config.time_of_day_weights.weight(s.hour))
                .unwrap_or(0.0),
            calorie_deviation,
            price_deviation,
            past_negative_outcome_rate,
            relevant_history_count: relevant.len(),
            negative_outcome_count,
            emotional_signal_present: emotion.is_some(),
            calorie_baseline,
            price_baseline,
        }
    }

    /// A record without a captured emotion counts for every current emotion;
    /// with no current signal every record counts.
    fn emotionally_similar(current: Option<&EmotionalSignal>, record: &HistoricalOrderRecord) -> bool {
        match (current, &record.emotion) {
            (Some(now), Some(then)) => now.same_emotion_as(then),
            _ => true,
        }
    }

    /// Average calories per ordering day across consumed orders.
    fn daily_calorie_baseline(window: &[&HistoricalOrderRecord]) -> Option<f64> {
        let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for record in window.iter().filter(|r| r.was_consumed()) {
            *per_day.entry(record.placed_at.date()).or_insert(0) += i64::from(record.total_calories);
        }
        mean(per_day.values().map(|&c| c as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::{DayOfWeek, Emotion};
    use crate::domain::foundation::{CafeId, ItemId, OrderId, Timestamp};
    use crate::domain::history::OrderOutcome;
    use crate::domain::order::OrderLine;

    fn order(calories: i32, price: f64) -> OrderCandidate {
        OrderCandidate::from_lines(
            CafeId::new(),
            vec![OrderLine {
                item_id: ItemId::new(),
                name: "Burrito Bowl".to_string(),
                category: "mains".to_string(),
                calories,
                price,
                quantity: 1,
            }],
        )
        .unwrap()
    }

    fn signal(emotion: Emotion, intensity: u8, hour: u8) -> EmotionalSignal {
        EmotionalSignal {
            emotion,
            intensity,
            time_of_day: format!("{:02}:15", hour),
            hour,
            day_of_week: DayOfWeek::Tue,
            captured_at: Timestamp::from_rfc3339("2025-03-11T12:00:00Z").unwrap(),
        }
    }

    fn past(days_ago: i64, calories: i32, price: f64, outcome: OrderOutcome) -> HistoricalOrderRecord {
        HistoricalOrderRecord::new(
            OrderId::new(),
            CafeId::new(),
            Timestamp::from_rfc3339("2025-03-10T19:00:00Z")
                .unwrap()
                .minus_days(days_ago),
            calories,
            price,
            outcome,
        )
    }

    #[test]
    fn cold_start_is_neutral() {
        let config = RegretEngineConfig::default();
        let features = FeatureExtractor::new(&config).extract(&order(2500, 40.0), None, &[]);

        assert_eq!(features.emotional_risk_weight, 0.0);
        assert_eq!(features.time_of_day_risk_weight, 0.0);
        assert_eq!(features.calorie_deviation, 0.0);
        assert_eq!(features.price_deviation, 0.0);
        assert_eq!(features.past_negative_outcome_rate, 0.0);
        assert_eq!(features.relevant_history_count, 0);
        assert!(!features.emotional_signal_present);
        assert_eq!(features.calorie_baseline, None);
    }

    #[test]
    fn emotion_and_hour_come_from_tables() {
        let config = RegretEngineConfig::default();
        let s = signal(Emotion::Sadness, 5, 1);
        let features = FeatureExtractor::new(&config).extract(&order(500, 10.0), Some(&s), &[]);

        assert!((features.emotional_risk_weight - 0.9).abs() < 1e-9);
        assert!((features.time_of_day_risk_weight - 1.0).abs() < 1e-9);
        assert!(features.emotional_signal_present);
    }

    #[test]
    fn calorie_deviation_uses_daily_average() {
        let config = RegretEngineConfig::default();
        let history = vec![
            // Two orders on the same day count as one 1200 kcal day.
            past(1, 600, 10.0, OrderOutcome::Neutral),
            past(1, 600, 10.0, OrderOutcome::Neutral),
            past(2, 800, 10.0, OrderOutcome::Neutral),
        ];
        let features =
            FeatureExtractor::new(&config).extract(&order(1500, 10.0), None, &history);

        assert_eq!(features.calorie_baseline, Some(1000.0));
        assert!((features.calorie_deviation - 0.5).abs() < 1e-9);
    }

    #[test]
    fn deviations_are_clamped() {
        let config = RegretEngineConfig::default();
        let history = vec![past(1, 500, 10.0, OrderOutcome::Neutral)];
        let extractor = FeatureExtractor::new(&config);

        let big = extractor.extract(&order(5000, 500.0), None, &history);
        assert_eq!(big.calorie_deviation, 1.0);
        assert_eq!(big.price_deviation, 1.0);

        let small = extractor.extract(&order(0, 0.0), None, &history);
        assert!((small.calorie_deviation + 0.5).abs() < 1e-9);
        assert!((small.price_deviation + 0.5).abs() < 1e-9);
    }

    #[test]
    fn cancelled_orders_do_not_set_baselines() {
        let config = RegretEngineConfig::default();
        let history = vec![past(1, 3000, 90.0, OrderOutcome::Cancelled)];
        let features = FeatureExtractor::new(&config).extract(&order(800, 12.0), None, &history);

        assert_eq!(features.calorie_baseline, None);
        assert_eq!(features.price_baseline, None);
        assert_eq!(features.calorie_deviation, 0.0);
        // ...but still count as a negative outcome.
        assert_eq!(features.past_negative_outcome_rate, 1.0);
    }

    #[test]
    fn negative_rate_is_conditioned_on_emotion() {
        let config = RegretEngineConfig::default();
        let sad = signal(Emotion::Sadness, 4, 20);
        let happy = signal(Emotion::Happiness, 4, 20);
        let history = vec![
            past(1, 600, 10.0, OrderOutcome::NegativeReview).with_emotion(sad.clone()),
            past(2, 600, 10.0, OrderOutcome::Neutral).with_emotion(sad.clone()),
            past(3, 600, 10.0, OrderOutcome::Cancelled).with_emotion(happy.clone()),
            past(4, 600, 10.0, OrderOutcome::Reordered).with_emotion(happy),
            past(5, 600, 10.0, OrderOutcome::Cancelled),
        ];
        let features =
            FeatureExtractor::new(&config).extract(&order(600, 10.0), Some(&sad), &history);

        // Two sad records plus the one without a recorded emotion.
        assert_eq!(features.relevant_history_count, 3);
        assert_eq!(features.negative_outcome_count, 2);
        assert!((features.past_negative_outcome_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn without_current_signal_all_records_are_relevant() {
        let config = RegretEngineConfig::default();
        let sad = signal(Emotion::Sadness, 4, 20);
        let history = vec![
            past(1, 600, 10.0, OrderOutcome::NegativeReview).with_emotion(sad),
            past(2, 600, 10.0, OrderOutcome::Neutral),
        ];
        let features = FeatureExtractor::new(&config).extract(&order(600, 10.0), None, &history);

        assert_eq!(features.relevant_history_count, 2);
        assert!((features.past_negative_outcome_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn window_keeps_most_recent_records() {
        let config = RegretEngineConfig {
            history_window_size: 2,
            ..Default::default()
        };
        // Given oldest first on purpose.
        let history = vec![
            past(9, 600, 10.0, OrderOutcome::Cancelled),
            past(2, 600, 10.0, OrderOutcome::Neutral),
            past(1, 600, 10.0, OrderOutcome::Neutral),
        ];
        let extractor = FeatureExtractor::new(&config);

        let window = extractor.window(&history);
        assert_eq!(window.len(), 2);
        assert!(window[0].placed_at.is_after(&window[1].placed_at));

        let features = extractor.extract(&order(600, 10.0), None, &history);
        assert_eq!(features.past_negative_outcome_rate, 0.0);
    }

    #[test]
    fn feature_value_matches_fields() {
        let config = RegretEngineConfig::default();
        let s = signal(Emotion::Anger, 3, 22);
        let features = FeatureExtractor::new(&config).extract(&order(600, 10.0), Some(&s), &[]);

        assert_eq!(features.value(Feature::EmotionalRisk), features.emotional_risk_weight);
        assert_eq!(features.value(Feature::TimeOfDayRisk), 0.5);
    }
}
