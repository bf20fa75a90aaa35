//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## History Ports
//!
//! - `OrderHistoryReader` - Recent orders for a user, newest first
//! - `OrderHistoryRepository` - Append-only recording of labelled orders

mod order_history_reader;
mod order_history_repository;

pub use order_history_reader::OrderHistoryReader;
pub use order_history_repository::OrderHistoryRepository;
