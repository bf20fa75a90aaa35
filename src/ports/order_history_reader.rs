//! Order history reader port (read side).
//!
//! Defines how the checkout flow pulls a user's recent orders from the
//! behavioral history store.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoricalOrderRecord;

/// Reader port for a user's past orders.
#[async_trait]
pub trait OrderHistoryReader: Send + Sync {
    /// Returns at most `limit` of the user's orders, most recent first.
    ///
    /// An unknown user has an empty history, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` or `SerializationError` when the store
    /// cannot be read.
    async fn recent_orders(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoricalOrderRecord>, DomainError>;
}
