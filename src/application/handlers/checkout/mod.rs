//! Checkout handlers.

mod assess_checkout;
mod record_order_outcome;

pub use assess_checkout::{
    AssessCheckoutCommand, AssessCheckoutError, AssessCheckoutHandler, AssessCheckoutResult,
    HistorySource,
};
pub use record_order_outcome::{RecordOrderOutcomeCommand, RecordOrderOutcomeHandler};
