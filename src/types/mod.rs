//! Core types for EcoRangers

mod action;
mod detection;
mod output;
mod prompt;
mod reason;
mod state;
mod vocabulary;

pub use action::{ActionEvent, Feedback, PitchSample};
pub use detection::{CategorySet, DetectionReport, FrameOutcome, RawDetection};
pub use output::GameState;
pub use prompt::Prompt;
pub use reason::ReasonCode;
pub use state::GamePhase;
pub use vocabulary::{display_name, Vocabulary, DEFAULT_VOCABULARY};
