//! Construction-time errors
//!
//! Everything here indicates a build or packaging defect. Runtime sensing
//! failures are not errors: they travel as data (see `FrameOutcome`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    #[error("vocabulary entry {index} is blank")]
    BlankVocabularyEntry { index: usize },

    #[error("confidence threshold {0} must lie in [0, 1)")]
    InvalidConfidenceThreshold(f64),

    #[error("prompt catalog is empty")]
    EmptyCatalog,

    #[error("prompt {index} has a blank name")]
    BlankPromptName { index: usize },

    #[error("round length must be at least one second")]
    ZeroRoundLength,

    #[error("tick period must be non-zero")]
    ZeroTickPeriod,

    #[error("tilt threshold {0} must be finite and positive")]
    InvalidTiltThreshold(f64),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The game session's owner task has exited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("game session has shut down")]
pub struct SessionClosed;
