//! Domain layer containing the interview logic and its primitives.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `capture` - The guided interview aggregate and its snapshot

pub mod capture;
pub mod foundation;
