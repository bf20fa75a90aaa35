//! State machine trait for status enums.
//!
//! Lifecycle statuses implement this instead of comparing status strings,
//! so every allowed move is listed in exactly one place.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list the allowed targets per state; the transition and
/// terminal checks are derived from that list.
///
/// ```ignore
/// let next = OrderStatus::Pending.transition_to(OrderStatus::Accepted)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        Amber,
        Red,
        Off,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Green => vec![Light::Amber, Light::Off],
                Light::Amber => vec![Light::Red],
                Light::Red => vec![Light::Green, Light::Off],
                Light::Off => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_listed_target() {
        assert_eq!(Light::Green.transition_to(Light::Amber), Ok(Light::Amber));
    }

    #[test]
    fn transition_to_fails_for_unlisted_target() {
        let err = Light::Green.transition_to(Light::Red).unwrap_err();
        assert_eq!(err.field(), "state_transition");
        assert!(err.to_string().contains("Green"));
    }

    #[test]
    fn can_transition_to_follows_valid_transitions() {
        assert!(Light::Red.can_transition_to(&Light::Green));
        assert!(!Light::Amber.can_transition_to(&Light::Green));
    }

    #[test]
    fn only_states_without_targets_are_terminal() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Green.is_terminal());
    }
}
