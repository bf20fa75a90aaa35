//! RegretEngine - evaluation entry point.
//!
//! Stateless apart from its immutable configuration, so one engine can be
//! shared across request contexts without locking.

use serde::Serialize;

use super::{
    calibrate, EvaluationError, Explainer, FeatureExtractor, FeatureVector, RegretEngineConfig,
    RegretPrediction, RegretScorer, ScoreBreakdown,
};
use crate::domain::emotion::EmotionalSignal;
use crate::domain::history::HistoricalOrderRecord;
use crate::domain::order::OrderCandidate;

/// Everything computed during one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegretAssessment {
    pub features: FeatureVector,
    pub breakdown: ScoreBreakdown,
    pub prediction: RegretPrediction,
}

/// Scores a pending order for the chance it will be regretted.
#[derive(Debug, Clone, Default)]
pub struct RegretEngine {
    config: RegretEngineConfig,
}

impl RegretEngine {
    /// Creates an engine, rejecting an inconsistent configuration up front.
    pub fn new(config: RegretEngineConfig) -> Result<Self, EvaluationError> {
        config.validate().map_err(EvaluationError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegretEngineConfig {
        &self.config
    }

    /// Evaluates a pending order.
    ///
    /// `history` should be most-recent-first; only the newest
    /// `history_window_size` records are used. An absent signal or an empty
    /// history is a cold start, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed input.
    pub fn evaluate(
        &self,
        order: &OrderCandidate,
        emotion: Option<&EmotionalSignal>,
        history: &[HistoricalOrderRecord],
    ) -> Result<RegretPrediction, EvaluationError> {
        self.assess(order, emotion, history)
            .map(|assessment| assessment.prediction)
    }

    /// Like [`evaluate`](Self::evaluate) but also returns the features and
    /// per-feature contributions behind the prediction.
    pub fn assess(
        &self,
        order: &OrderCandidate,
        emotion: Option<&EmotionalSignal>,
        history: &[HistoricalOrderRecord],
    ) -> Result<RegretAssessment, EvaluationError> {
        Self::validate_inputs(order, emotion, history)?;

        let features = FeatureExtractor::new(&self.config).extract(order, emotion, history);
        let breakdown = RegretScorer::score(&features);
        let level = self.config.risk_thresholds.bucket(breakdown.score);
        let confidence = calibrate(
            features.relevant_history_count,
            features.emotional_signal_present,
        );

        let explainer = Explainer::new(&self.config);
        let reasons = explainer.reasons(&breakdown, &features, level, emotion);
        let suggestions = explainer.suggestions(&breakdown, &features, emotion);

        let prediction =
            RegretPrediction::new(level, breakdown.score, confidence, reasons, suggestions);

        Ok(RegretAssessment {
            features,
            breakdown,
            prediction,
        })
    }

    fn validate_inputs(
        order: &OrderCandidate,
        emotion: Option<&EmotionalSignal>,
        history: &[HistoricalOrderRecord],
    ) -> Result<(), EvaluationError> {
        if let Some(signal) = emotion {
            signal.validate().map_err(EvaluationError::InvalidSignal)?;
        }
        order.validate().map_err(EvaluationError::InvalidOrder)?;
        history
            .iter()
            .enumerate()
            .try_for_each(|(index, record)| {
                record
                    .validate()
                    .map_err(|source| EvaluationError::InvalidHistoryRecord { index, source })
            })
    }
}
