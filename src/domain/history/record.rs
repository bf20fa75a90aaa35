//! HistoricalOrderRecord - one past order with its outcome.

use serde::{Deserialize, Serialize};

use super::OrderOutcome;
use crate::domain::emotion::EmotionalSignal;
use crate::domain::foundation::{ensure_non_negative, CafeId, OrderId, Timestamp, ValidationError};

/// A past order annotated with what happened afterwards.
///
/// Records are append-only in the history store; nothing edits them after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalOrderRecord {
    pub order_id: OrderId,
    pub cafe_id: CafeId,
    pub placed_at: Timestamp,
    pub total_calories: i32,
    pub total_price: f64,
    pub outcome: OrderOutcome,
    /// The signal captured at checkout, if the user shared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionalSignal>,
}

impl HistoricalOrderRecord {
    pub fn new(
        order_id: OrderId,
        cafe_id: CafeId,
        placed_at: Timestamp,
        total_calories: i32,
        total_price: f64,
        outcome: OrderOutcome,
    ) -> Self {
        Self {
            order_id,
            cafe_id,
            placed_at,
            total_calories,
            total_price,
            outcome,
            emotion: None,
        }
    }

    /// Attaches the emotional signal captured when the order was placed.
    pub fn with_emotion(mut self, signal: EmotionalSignal) -> Self {
        self.emotion = Some(signal);
        self
    }

    /// Returns false for orders that were never eaten or paid for.
    pub fn was_consumed(&self) -> bool {
        self.outcome != OrderOutcome::Cancelled
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_calories < 0 {
            return Err(ValidationError::negative_or_non_finite(
                "total_calories",
                f64::from(self.total_calories),
            ));
        }
        ensure_non_negative("total_price", self.total_price)?;
        if let Some(signal) = &self.emotion {
            signal.validate()?;
        }
        Ok(())
    }
}
