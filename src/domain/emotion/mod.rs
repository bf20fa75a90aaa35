//! Emotion module - the emotional signal captured at checkout.
//!
//! The capture flow owns these values; the regret engine only reads them.

mod emotion;
mod signal;

pub use emotion::Emotion;
pub use signal::{parse_time_of_day, DayOfWeek, EmotionalSignal, MAX_INTENSITY, MIN_INTENSITY};
