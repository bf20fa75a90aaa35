//! In-Memory Order History Adapter
//!
//! Keeps every user's history in a shared map. Useful for testing and
//! development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::most_recent;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::history::HistoricalOrderRecord;
use crate::ports::{OrderHistoryReader, OrderHistoryRepository};

/// In-memory storage for order history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderHistory {
    records: Arc<RwLock<HashMap<UserId, Vec<HistoricalOrderRecord>>>>,
}

impl InMemoryOrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one user's history.
    pub fn with_history(user_id: UserId, records: Vec<HistoricalOrderRecord>) -> Self {
        let mut map = HashMap::new();
        map.insert(user_id, records);
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of records stored for a user.
    pub async fn count_for(&self, user_id: &UserId) -> usize {
        self.records
            .read()
            .await
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl OrderHistoryReader for InMemoryOrderHistory {
    async fn recent_orders(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<HistoricalOrderRecord>, DomainError> {
        let records = self.records.read().await;
        let history = records.get(user_id).cloned().unwrap_or_default();
        Ok(most_recent(history, limit))
    }
}

#[async_trait]
impl OrderHistoryRepository for InMemoryOrderHistory {
    async fn append(
        &self,
        user_id: &UserId,
        record: HistoricalOrderRecord,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.entry(user_id.clone()).or_default().push(record);
        Ok(())
    }
}
