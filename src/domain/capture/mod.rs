//! Capture module - the guided interview.
//!
//! A `GuidedCapture` asks a completion service for clarifying questions
//! about a topic, collects the user's answers, then asks the service to
//! turn those answers into an artifact in the requested format. Its
//! `CaptureState` snapshot lets an interview be suspended and resumed.

mod aggregate;
mod errors;
mod parser;
mod prompts;
mod state;
mod status;

pub use aggregate::{CaptureOptions, GuidedCapture, DEFAULT_NUM_QUESTIONS};
pub use errors::CaptureError;
pub use parser::parse_question_list;
pub use prompts::{
    question_generation_prompt, synthesis_prompt, MISSING_ANSWER_PLACEHOLDER,
    QUESTION_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
pub use state::{is_answered, CaptureState};
pub use status::CaptureStatus;
