//! Regret module - the regret prediction engine.
//!
//! A pipeline of pure stages:
//!
//! 1. [`FeatureExtractor`] turns order, signal and history into a [`FeatureVector`]
//! 2. [`RegretScorer`] combines features into a 0-100 score
//! 3. [`RiskThresholds`] bucket the score into a [`RiskLevel`]
//! 4. [`calibrate`] sets confidence from the amount of evidence
//! 5. [`Explainer`] writes reasons and suggestions
//!
//! [`RegretEngine`] runs the pipeline and returns a [`RegretPrediction`].

mod confidence;
mod engine;
mod errors;
mod explanation;
mod features;
mod level;
mod prediction;
mod scoring;
mod settings;
mod tables;

pub use confidence::{
    calibrate, BASE_CONFIDENCE, CONFIDENCE_FOR_SIGNAL, CONFIDENCE_PER_RELEVANT_ORDER,
};
pub use engine::{RegretAssessment, RegretEngine};
pub use errors::EvaluationError;
pub use explanation::Explainer;
pub use features::{Feature, FeatureExtractor, FeatureVector};
pub use level::{RiskLevel, RiskThresholds};
pub use prediction::{RegretPrediction, SUPPRESSION_CONFIDENCE_FLOOR};
pub use scoring::{Contribution, RegretScorer, ScoreBreakdown};
pub use settings::{
    DeviationScales, RegretEngineConfig, SuggestionTriggers, DEFAULT_HISTORY_WINDOW_SIZE,
    DEFAULT_REASON_MIN_CONTRIBUTION,
};
pub use tables::{EmotionalWeightTable, HourRangeWeight, IntensityRow, TimeOfDayWeightTable};
