//! Core engines for EcoRangers

pub mod classifier;
pub mod cleanup;
pub mod deck;
pub mod frame_parser;
pub mod game;
pub mod gesture;
pub mod session;
pub mod stream;

pub use classifier::ClassifierFilter;
pub use cleanup::CleanupTracker;
pub use deck::PromptDeck;
pub use frame_parser::FrameParser;
pub use game::{ActionOutcome, AdvanceTicket, GameEngine};
pub use gesture::GestureGate;
pub use session::{GameCommand, GameHandle, GameSession, SessionTiming};
pub use stream::{DetectionStream, DetectionSubscription};
