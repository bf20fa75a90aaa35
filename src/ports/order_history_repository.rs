//! Order history repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoricalOrderRecord;

/// Repository port for recording labelled orders.
///
/// History is append-only: records are never updated or removed.
#[async_trait]
pub trait OrderHistoryRepository: Send + Sync {
    /// Appends a labelled order to the user's history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be persisted.
    async fn append(&self, user_id: &UserId, record: HistoricalOrderRecord)
        -> Result<(), DomainError>;
}
