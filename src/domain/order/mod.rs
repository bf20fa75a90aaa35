//! Order module - the pending order and the order lifecycle.

mod candidate;
mod status;

pub use candidate::{OrderCandidate, OrderLine};
pub use status::{CancellationPolicy, OrderStatus, DEFAULT_CANCELLATION_WINDOW_MINUTES};
