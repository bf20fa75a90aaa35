//! Lookup tables mapping emotional state and clock time to risk weights.
//!
//! Both tables are plain data so they can be overridden from configuration
//! and tested without touching scoring code.

use serde::{Deserialize, Serialize};

use crate::domain::emotion::{Emotion, MAX_INTENSITY, MIN_INTENSITY};
use crate::domain::foundation::ValidationError;

/// One weight per intensity level, index 0 = intensity 1.
pub type IntensityRow = [f64; 5];

fn check_weight(field: &str, weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        return Err(ValidationError::invalid_format(
            field,
            format!("weight must be within [0, 1], got {}", weight),
        ));
    }
    Ok(())
}

/// Base risk weight for each (emotion, intensity) pair.
///
/// Rows left out of a configuration override keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionalWeightTable {
    pub happiness: IntensityRow,
    pub sadness: IntensityRow,
    pub anger: IntensityRow,
    pub fear: IntensityRow,
    pub surprise: IntensityRow,
    pub disgust: IntensityRow,
}

impl Default for EmotionalWeightTable {
    fn default() -> Self {
        Self {
            happiness: [0.0, 0.0, 0.05, 0.05, 0.1],
            sadness: [0.2, 0.35, 0.5, 0.7, 0.9],
            anger: [0.15, 0.3, 0.45, 0.6, 0.8],
            fear: [0.15, 0.25, 0.4, 0.55, 0.7],
            surprise: [0.05, 0.05, 0.1, 0.1, 0.1],
            disgust: [0.1, 0.2, 0.35, 0.5, 0.65],
        }
    }
}

impl EmotionalWeightTable {
    /// Returns the row for one emotion.
    pub fn row(&self, emotion: Emotion) -> &IntensityRow {
        match emotion {
            Emotion::Happiness => &self.happiness,
            Emotion::Sadness => &self.sadness,
            Emotion::Anger => &self.anger,
            Emotion::Fear => &self.fear,
            Emotion::Surprise => &self.surprise,
            Emotion::Disgust => &self.disgust,
        }
    }

    /// Looks up the weight. Intensity is clamped into 1-5; callers validate
    /// the signal before scoring.
    pub fn weight(&self, emotion: Emotion, intensity: u8) -> f64 {
        let idx = usize::from(intensity.clamp(MIN_INTENSITY, MAX_INTENSITY) - MIN_INTENSITY);
        self.row(emotion)[idx]
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for emotion in Emotion::ALL {
            for (idx, weight) in self.row(emotion).iter().enumerate() {
                check_weight(
                    &format!("emotional_weights.{}[{}]", emotion, idx),
                    *weight,
                )?;
            }
        }
        Ok(())
    }
}

/// Weight applied to hours in `[start_hour, end_hour)`.
///
/// A range with `start_hour > end_hour` wraps past midnight, so
/// `23 -> 5` covers 23:00 through 04:59.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourRangeWeight {
    pub start_hour: u8,
    pub end_hour: u8,
    pub weight: f64,
}

impl HourRangeWeight {
    pub fn new(start_hour: u8, end_hour: u8, weight: f64) -> Self {
        Self {
            start_hour,
            end_hour,
            weight,
        }
    }

    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour < self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let field = format!("time_of_day_weights[{}]", index);
        if self.start_hour > 23 {
            return Err(ValidationError::out_of_range(
                format!("{}.start_hour", field),
                0,
                23,
                i32::from(self.start_hour),
            ));
        }
        if self.end_hour > 24 {
            return Err(ValidationError::out_of_range(
                format!("{}.end_hour", field),
                0,
                24,
                i32::from(self.end_hour),
            ));
        }
        if self.start_hour == self.end_hour {
            return Err(ValidationError::invalid_format(field, "range is empty"));
        }
        check_weight(&format!("{}.weight", field), self.weight)
    }
}

/// Risk weight by local hour. Hours covered by no range weigh zero;
/// overlapping ranges take the largest weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDayWeightTable {
    ranges: Vec<HourRangeWeight>,
}

impl Default for TimeOfDayWeightTable {
    fn default() -> Self {
        Self::new(vec![
            HourRangeWeight::new(23, 5, 1.0),
            HourRangeWeight::new(21, 23, 0.5),
            HourRangeWeight::new(5, 7, 0.3),
        ])
    }
}

impl TimeOfDayWeightTable {
    pub fn new(ranges: Vec<HourRangeWeight>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[HourRangeWeight] {
        &self.ranges
    }

    pub fn weight(&self, hour: u8) -> f64 {
        self.ranges
            .iter()
            .filter(|r| r.contains(hour))
            .map(|r| r.weight)
            .fold(0.0, f64::max)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ranges
            .iter()
            .enumerate()
            .try_for_each(|(idx, range)| range.validate(idx))
    }
}
