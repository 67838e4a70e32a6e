//! Interview lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where an interview is in its lifecycle.
///
/// ```text
/// Uninitialized --generate--> QuestionsReady --synthesize--> Synthesized
///                              ^   |  answer / regenerate       |
///                              +---+<---------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureStatus {
    /// No questions generated yet.
    #[default]
    Uninitialized,
    /// Questions exist; answers are being collected.
    QuestionsReady,
    /// A final artifact has been produced from the current answers.
    Synthesized,
}

impl CaptureStatus {
    /// Rebuilds the status from the two snapshot flags.
    ///
    /// Returns `None` for the impossible combination of a synthesis without
    /// generated questions.
    pub fn from_flags(questions_generated: bool, synthesis_complete: bool) -> Option<Self> {
        match (questions_generated, synthesis_complete) {
            (false, false) => Some(CaptureStatus::Uninitialized),
            (true, false) => Some(CaptureStatus::QuestionsReady),
            (true, true) => Some(CaptureStatus::Synthesized),
            (false, true) => None,
        }
    }

    pub fn questions_generated(&self) -> bool {
        !matches!(self, CaptureStatus::Uninitialized)
    }

    pub fn synthesis_complete(&self) -> bool {
        matches!(self, CaptureStatus::Synthesized)
    }
}

impl StateMachine for CaptureStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use CaptureStatus::*;
        match self {
            Uninitialized => vec![QuestionsReady],
            QuestionsReady => vec![QuestionsReady, Synthesized],
            Synthesized => vec![QuestionsReady, Synthesized],
        }
    }
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaptureStatus::Uninitialized => "uninitialized",
            CaptureStatus::QuestionsReady => "questions_ready",
            CaptureStatus::Synthesized => "synthesized",
        };
        write!(f, "{}", s)
    }
}
