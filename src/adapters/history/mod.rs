//! Order history adapters.
//!
//! - `InMemoryOrderHistory` - process-local store for tests and development
//! - `FileOrderHistory` - one YAML file per user on local disk

mod file;
mod in_memory;

pub use file::FileOrderHistory;
pub use in_memory::InMemoryOrderHistory;

use crate::domain::history::HistoricalOrderRecord;

/// Sorts newest first and keeps at most `limit` records.
fn most_recent(mut records: Vec<HistoricalOrderRecord>, limit: usize) -> Vec<HistoricalOrderRecord> {
    records.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    records.truncate(limit);
    records
}
