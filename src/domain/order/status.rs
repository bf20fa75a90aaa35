//! OrderStatus - the canonical order lifecycle.
//!
//! Status strings arriving from other services are parsed against a fixed
//! vocabulary; nothing downstream inspects raw status text.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    DomainError, ErrorCode, StateMachine, Timestamp, ValidationError,
};

/// Lifecycle status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Ready,
    PickedUp,
    Delivered,
    Cancelled,
    Refunded,
}

/// Accepted spellings, keyed by their normalised form.
static STATUS_TOKENS: Lazy<HashMap<&'static str, OrderStatus>> = Lazy::new(|| {
    let mut tokens = HashMap::new();
    for status in OrderStatus::ALL {
        tokens.insert(status.as_str(), status);
    }
    tokens.insert("CANCELED", OrderStatus::Cancelled);
    tokens
});

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Declined,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// Returns the canonical token (`PICKED_UP`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Declined => "DECLINED",
            OrderStatus::Ready => "READY",
            OrderStatus::PickedUp => "PICKED_UP",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Refunded => "REFUNDED",
        }
    }

    /// Returns true while the customer may still cancel.
    pub fn is_customer_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Accepted)
    }

    /// Returns true if the order never reached the customer.
    pub fn is_abandoned(&self) -> bool {
        matches!(
            self,
            OrderStatus::Declined | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl StateMachine for OrderStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Accepted, Declined, Cancelled],
            Accepted => vec![Ready, PickedUp, Cancelled],
            Ready => vec![PickedUp],
            PickedUp => vec![Delivered],
            Delivered => vec![Refunded],
            Cancelled => vec![Refunded],
            Declined | Refunded => vec![],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Exact match on the canonical vocabulary, ignoring case, with `-` and
    /// spaces read as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        STATUS_TOKENS
            .get(normalised.as_str())
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown order status '{}'", s))
            })
    }
}

/// Minutes after placement during which the customer may cancel.
pub const DEFAULT_CANCELLATION_WINDOW_MINUTES: i64 = 15;

/// Customer cancellation rule: cancellable status and inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationPolicy {
    pub window_minutes: i64,
}

impl Default for CancellationPolicy {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_CANCELLATION_WINDOW_MINUTES,
        }
    }
}

impl CancellationPolicy {
    /// Last instant at which a cancellation is accepted.
    pub fn cancellable_until(&self, placed_at: &Timestamp) -> Timestamp {
        placed_at.plus_minutes(self.window_minutes)
    }

    /// Returns the new status if the customer may cancel now.
    pub fn cancel(
        &self,
        status: OrderStatus,
        placed_at: &Timestamp,
        now: &Timestamp,
    ) -> Result<OrderStatus, DomainError> {
        if now.is_after(&self.cancellable_until(placed_at)) {
            return Err(DomainError::new(
                ErrorCode::CancellationWindowClosed,
                "Cancellation window passed",
            ));
        }
        if !status.is_customer_cancellable() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Order cannot be cancelled while {}", status),
            ));
        }
        status
            .transition_to(OrderStatus::Cancelled)
            .map_err(DomainError::from)
    }
}
