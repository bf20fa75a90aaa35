//! RecordOrderOutcomeHandler - Appends a finished order to the user's history.
//!
//! Labels the order from its final status, review and reorder data so later
//! assessments can learn from it.

use std::sync::Arc;

use crate::domain::emotion::EmotionalSignal;
use crate::domain::foundation::{CafeId, DomainError, ErrorCode, OrderId, Timestamp, UserId};
use crate::domain::history::{HistoricalOrderRecord, OrderOutcome};
use crate::domain::order::OrderStatus;
use crate::ports::OrderHistoryRepository;

/// Command to record the outcome of a finished order.
#[derive(Debug, Clone)]
pub struct RecordOrderOutcomeCommand {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub cafe_id: CafeId,
    pub placed_at: Timestamp,
    pub total_calories: i32,
    pub total_price: f64,
    pub status: OrderStatus,
    /// Star rating (1-5) the user left for the cafe, if any.
    pub review_rating: Option<f32>,
    pub reordered: bool,
    pub emotion: Option<EmotionalSignal>,
}

/// Handler for recording order outcomes.
pub struct RecordOrderOutcomeHandler {
    repository: Arc<dyn OrderHistoryRepository>,
}

impl RecordOrderOutcomeHandler {
    pub fn new(repository: Arc<dyn OrderHistoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RecordOrderOutcomeCommand,
    ) -> Result<HistoricalOrderRecord, DomainError> {
        // 1. Only finished orders have an outcome
        if !(cmd.status == OrderStatus::Delivered || cmd.status.is_abandoned()) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Order is still {}; outcome not known yet", cmd.status),
            ));
        }
        if let Some(rating) = cmd.review_rating {
            if !(1.0..=5.0).contains(&rating) {
                return Err(DomainError::validation(
                    "review_rating",
                    format!("Rating must be between 1 and 5, got {}", rating),
                ));
            }
        }

        // 2. Label and build the record
        let outcome = OrderOutcome::label(cmd.status, cmd.review_rating, cmd.reordered);
        let mut record = HistoricalOrderRecord::new(
            cmd.order_id,
            cmd.cafe_id,
            cmd.placed_at,
            cmd.total_calories,
            cmd.total_price,
            outcome,
        );
        if let Some(signal) = cmd.emotion {
            record = record.with_emotion(signal);
        }
        record.validate()?;

        // 3. Persist
        self.repository.append(&cmd.user_id, record.clone()).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            order_id = %cmd.order_id,
            outcome = %outcome,
            "Recorded order outcome"
        );

        Ok(record)
    }
}
