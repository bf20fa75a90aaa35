//! History module - the user's past orders as the engine sees them.
//!
//! Records come from the behavioral history store through
//! [`crate::ports::OrderHistoryReader`]; this module only defines their shape
//! and how outcomes are labelled.

mod outcome;
mod record;

pub use outcome::{OrderOutcome, NEGATIVE_REVIEW_MAX_RATING};
pub use record::HistoricalOrderRecord;
