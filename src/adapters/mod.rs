//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `history` - Order history stores (in-memory, YAML files)

pub mod history;

pub use history::{FileOrderHistory, InMemoryOrderHistory};
