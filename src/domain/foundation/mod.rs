//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, errors and the state machine trait
//! that the rest of the domain builds on.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
