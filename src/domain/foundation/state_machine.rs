//! State machine trait for status enums.
//!
//! Gives lifecycle statuses a single way to declare and enforce their
//! legal transitions.

use super::TransitionError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal transitions and get a validated
/// `transition_to` for free.
///
/// ```ignore
/// let next = CaptureStatus::QuestionsReady.transition_to(CaptureStatus::Synthesized)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(TransitionError::new(
                format!("{:?}", self),
                format!("{:?}", target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
