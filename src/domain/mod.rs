//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `emotion` - Emotional signal captured at checkout
//! - `order` - Pending order contents and order lifecycle
//! - `history` - Past orders and their outcome labels
//! - `regret` - Regret prediction engine (features, scoring, explanation)

pub mod emotion;
pub mod foundation;
pub mod history;
pub mod order;
pub mod regret;
