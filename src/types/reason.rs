//! Reason codes attached to every game snapshot

use serde::{Deserialize, Serialize};

use crate::types::ActionEvent;

/// Why the engine produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // G001: Session lifecycle
    // =========================================================================
    /// Deck reshuffled, countdown reset, input armed
    G001_STARTED,
    /// Host tore the session down
    G001_STOPPED,

    // =========================================================================
    // G002: Countdown
    // =========================================================================
    /// One second elapsed
    G002_TICK,

    // =========================================================================
    // G003: Actions
    // =========================================================================
    /// Tilt down accepted, score incremented
    G003_CORRECT,
    /// Tilt up accepted, score unchanged
    G003_PASS,

    // =========================================================================
    // G004: Deck
    // =========================================================================
    /// Cursor moved to the next prompt, input re-armed
    G004_ADVANCED,

    // =========================================================================
    // G005: Termination
    // =========================================================================
    /// Countdown reached zero
    G005_TIME_EXPIRED,
    /// Cursor moved past the last prompt
    G005_DECK_EXHAUSTED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::G001_STARTED => "G001_STARTED",
            Self::G001_STOPPED => "G001_STOPPED",
            Self::G002_TICK => "G002_TICK",
            Self::G003_CORRECT => "G003_CORRECT",
            Self::G003_PASS => "G003_PASS",
            Self::G004_ADVANCED => "G004_ADVANCED",
            Self::G005_TIME_EXPIRED => "G005_TIME_EXPIRED",
            Self::G005_DECK_EXHAUSTED => "G005_DECK_EXHAUSTED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::G001_STARTED => "Game started",
            Self::G001_STOPPED => "Game stopped",
            Self::G002_TICK => "Countdown tick",
            Self::G003_CORRECT => "Correct guess",
            Self::G003_PASS => "Prompt passed",
            Self::G004_ADVANCED => "Next prompt",
            Self::G005_TIME_EXPIRED => "Time is up",
            Self::G005_DECK_EXHAUSTED => "No prompts left",
        }
    }

    /// Did this transition end the play-through?
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::G005_TIME_EXPIRED | Self::G005_DECK_EXHAUSTED)
    }

    /// Action accepted by this transition, if any
    pub fn action(&self) -> Option<ActionEvent> {
        match self {
            Self::G003_CORRECT => Some(ActionEvent::Correct),
            Self::G003_PASS => Some(ActionEvent::Pass),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
