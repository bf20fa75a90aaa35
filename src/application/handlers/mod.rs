//! Command handlers for the application layer.
//!
//! Handlers orchestrate domain operations and coordinate with ports.

pub mod checkout;

pub use checkout::{
    AssessCheckoutCommand, AssessCheckoutError, AssessCheckoutHandler, AssessCheckoutResult,
    HistorySource, RecordOrderOutcomeCommand, RecordOrderOutcomeHandler,
};
