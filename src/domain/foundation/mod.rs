//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, error types and the state machine trait
//! that the interview domain is built on.

mod errors;
mod ids;
mod state_machine;

pub use errors::{TransitionError, ValidationError};
pub use ids::SessionId;
pub use state_machine::StateMachine;
