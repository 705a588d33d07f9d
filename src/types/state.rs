//! Game phase definitions

use serde::{Deserialize, Serialize};

/// The four phases of a tilt game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Not started (or torn down)
    Idle,
    /// Countdown running, waiting for a tilt
    Running,
    /// A tilt was taken; the next prompt shows after the advance delay
    AwaitingNextPrompt,
    /// Time ran out or the deck was exhausted
    GameOver,
}

impl GamePhase {
    /// Does the countdown tick in this phase?
    pub fn is_counting_down(&self) -> bool {
        matches!(self, GamePhase::Running | GamePhase::AwaitingNextPrompt)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GamePhase::Idle => "\x1b[90m",               // Gray
            GamePhase::Running => "\x1b[32m",            // Green
            GamePhase::AwaitingNextPrompt => "\x1b[33m", // Yellow
            GamePhase::GameOver => "\x1b[31m",           // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            GamePhase::Idle => "⏸",
            GamePhase::Running => "♻",
            GamePhase::AwaitingNextPrompt => "⏳",
            GamePhase::GameOver => "🏁",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Idle => "IDLE",
            GamePhase::Running => "RUNNING",
            GamePhase::AwaitingNextPrompt => "AWAITING_NEXT_PROMPT",
            GamePhase::GameOver => "GAME_OVER",
        };
        write!(f, "{}", name)
    }
}
