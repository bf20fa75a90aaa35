//! Confidence calibration.
//!
//! Confidence grows with the amount of relevant history and with the
//! presence of an emotional signal, and saturates at 100. A user with no
//! history and no signal gets the base confidence only.

use crate::domain::foundation::Percentage;

/// Confidence with no evidence at all.
pub const BASE_CONFIDENCE: u32 = 20;

/// Added per relevant past order.
pub const CONFIDENCE_PER_RELEVANT_ORDER: u32 = 4;

/// Added when an emotional signal was captured.
pub const CONFIDENCE_FOR_SIGNAL: u32 = 20;

/// `min(100, 20 + 4k + 20s)`, where `k` is the relevant history count and
/// `s` is 1 when a signal was captured.
pub fn calibrate(relevant_history_count: usize, signal_present: bool) -> Percentage {
    let k = u32::try_from(relevant_history_count).unwrap_or(u32::MAX);
    let raw = BASE_CONFIDENCE
        .saturating_add(CONFIDENCE_PER_RELEVANT_ORDER.saturating_mul(k))
        .saturating_add(if signal_present { CONFIDENCE_FOR_SIGNAL } else { 0 });
    Percentage::new(u8::try_from(raw.min(100)).unwrap_or(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_is_base() {
        assert_eq!(calibrate(0, false).value(), 20);
    }

    #[test]
    fn signal_alone_adds_twenty() {
        assert_eq!(calibrate(0, true).value(), 40);
    }

    #[test]
    fn grows_with_history() {
        assert_eq!(calibrate(5, false).value(), 40);
        assert_eq!(calibrate(10, true).value(), 80);
    }

    #[test]
    fn saturates_at_one_hundred() {
        assert_eq!(calibrate(20, true).value(), 100);
        assert_eq!(calibrate(usize::MAX, true).value(), 100);
    }

    #[test]
    fn monotonic_in_history() {
        let values: Vec<_> = (0..30).map(|k| calibrate(k, false)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
