//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that the emotion,
//! order, history and regret modules build on.

mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CafeId, ItemId, OrderId, UserId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

pub(crate) use errors::ensure_non_negative;
