//! Post-order outcome labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::order::OrderStatus;

/// Highest star rating (1-5 scale) that still counts as a negative review.
pub const NEGATIVE_REVIEW_MAX_RATING: f32 = 2.0;

/// What happened after a past order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderOutcome {
    /// The user ordered the same thing again.
    Reordered,
    /// Nothing notable.
    Neutral,
    /// The user left a poor review of the order's cafe.
    NegativeReview,
    /// The order was cancelled, declined or refunded.
    Cancelled,
}

impl OrderOutcome {
    /// Returns true for the outcomes treated as regret.
    pub fn is_negative(&self) -> bool {
        matches!(self, OrderOutcome::NegativeReview | OrderOutcome::Cancelled)
    }

    /// Derives the label from lifecycle data.
    ///
    /// Precedence: an abandoned order is `Cancelled` whatever the review
    /// says; a rating at or below [`NEGATIVE_REVIEW_MAX_RATING`] beats a
    /// reorder.
    pub fn label(status: OrderStatus, review_rating: Option<f32>, reordered: bool) -> Self {
        if status.is_abandoned() {
            return OrderOutcome::Cancelled;
        }
        if review_rating.is_some_and(|r| r <= NEGATIVE_REVIEW_MAX_RATING) {
            return OrderOutcome::NegativeReview;
        }
        if reordered {
            return OrderOutcome::Reordered;
        }
        OrderOutcome::Neutral
    }
}

impl fmt::Display for OrderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderOutcome::Reordered => "reordered",
            OrderOutcome::Neutral => "neutral",
            OrderOutcome::NegativeReview => "negative_review",
            OrderOutcome::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_negative_review_and_cancelled_are_negative() {
        assert!(OrderOutcome::NegativeReview.is_negative());
        assert!(OrderOutcome::Cancelled.is_negative());
        assert!(!OrderOutcome::Reordered.is_negative());
        assert!(!OrderOutcome::Neutral.is_negative());
    }

    #[test]
    fn abandoned_statuses_label_cancelled() {
        for status in [OrderStatus::Cancelled, OrderStatus::Declined, OrderStatus::Refunded] {
            assert_eq!(OrderOutcome::label(status, Some(5.0), true), OrderOutcome::Cancelled);
        }
    }

    #[test]
    fn low_rating_labels_negative_review() {
        assert_eq!(
            OrderOutcome::label(OrderStatus::Delivered, Some(2.0), true),
            OrderOutcome::NegativeReview
        );
        assert_eq!(
            OrderOutcome::label(OrderStatus::Delivered, Some(2.5), false),
            OrderOutcome::Neutral
        );
    }

    #[test]
    fn reorder_without_bad_review_labels_reordered() {
        assert_eq!(
            OrderOutcome::label(OrderStatus::Delivered, Some(4.0), true),
            OrderOutcome::Reordered
        );
        assert_eq!(
            OrderOutcome::label(OrderStatus::Delivered, None, true),
            OrderOutcome::Reordered
        );
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderOutcome::NegativeReview).unwrap(),
            "\"negative_review\""
        );
        assert_eq!(OrderOutcome::NegativeReview.to_string(), "negative_review");
    }
}
