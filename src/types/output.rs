//! Game snapshot published after every mutation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{display_name, Feedback, GamePhase, Prompt, ReasonCode};

/// Read-only view of the game for the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Countdown value
    pub seconds_remaining: u32,
    /// Correct guesses this play-through
    pub score: u32,
    /// Index of the current prompt (== deck_len once exhausted)
    pub cursor: usize,
    /// Number of prompts in the deck
    pub deck_len: usize,
    /// Current phase
    pub phase: GamePhase,
    /// Prompt under the cursor, if any
    pub prompt: Option<Prompt>,
    /// What produced this snapshot
    pub reason: ReasonCode,
    /// Session generation the snapshot belongs to
    pub generation: u64,
}

impl GameState {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = GamePhase::color_reset();
        let emoji = self.phase.emoji();

        format!(
            "{}{} time={:>2} | score={} | card={}/{} | {} | {}{}",
            color,
            emoji,
            self.seconds_remaining,
            self.score,
            self.cursor_display(),
            self.deck_len,
            self.prompt_display(),
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "time={} | score={} | card={}/{} | phase={} | reason={}",
            self.seconds_remaining,
            self.score,
            self.cursor_display(),
            self.deck_len,
            self.phase,
            self.reason.code()
        )
    }

    /// Final score lines shown on the game-over card
    pub fn summary(&self) -> String {
        format!(
            "GAME OVER!\nFinal Score: {}\nYou identified {} trash items!",
            self.score, self.score
        )
    }

    /// Haptic the host should play for this snapshot
    pub fn feedback(&self) -> Option<Feedback> {
        self.reason.action().map(|event| event.feedback())
    }

    fn cursor_display(&self) -> usize {
        (self.cursor + 1).min(self.deck_len)
    }

    fn prompt_display(&self) -> String {
        match (&self.prompt, self.phase) {
            (_, GamePhase::GameOver) => format!("Final Score: {}", self.score),
            (Some(prompt), _) => format!("{} - {}", display_name(&prompt.name), prompt.hint),
            (None, _) => "-".to_string(),
        }
    }
}
