//! State machine trait for lifecycle enums.
//!
//! Used by the profile loading phase so every phase change goes through one
//! checked transition path.

use super::DomainError;

/// Trait for status enums that represent state machines.
///
/// Implementors list the legal transitions; `transition_to` and
/// `is_terminal` come for free.
///
/// # Example
///
/// ```ignore
/// let phase = LoadPhase::Idle.transition_to(LoadPhase::Loading)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::invalid_transition(self, target))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
