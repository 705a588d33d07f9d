//! EcoRangers core: trash detection resolution and the tilt trivia engine
//!
//! Two independent engines:
//! - camera frames → ClassifierFilter → DetectionStream → subscribers
//! - pitch samples → GestureGate → GameEngine (owned by GameSession) → snapshots

pub mod config;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod types;

// =============================================================================
// DETECTION
// =============================================================================

/// Detections must be strictly above this confidence to count
pub const CONFIDENCE_THRESHOLD: f64 = 0.2;

/// Diagnostic attached to every successfully classified frame
pub const DIAGNOSTIC_RUNNING: &str = "Detection running";

/// Points awarded for picking up a detected item
pub const PICK_POINTS: u32 = 10;

// =============================================================================
// GAME TIMING
// =============================================================================

/// Countdown length of one play-through (seconds)
pub const ROUND_DURATION_SECS: u32 = 60;

/// Countdown tick period (milliseconds)
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Dwell in AwaitingNextPrompt before the deck advances (milliseconds)
/// The countdown keeps running during this window.
pub const ADVANCE_DELAY_MS: u64 = 800;

/// Pitch (radians) beyond which a tilt fires: below -x = correct, above +x = pass
pub const TILT_THRESHOLD: f64 = 0.5;

// =============================================================================
// CHANNELS
// =============================================================================

/// Buffer size for snapshot / report fan-out
pub const UPDATE_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
