//! Motion samples and the discrete actions derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reading from the motion provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchSample {
    /// Device pitch in radians; negative = tilted down
    pub pitch: f64,
    /// Is the device physically held in landscape?
    pub landscape: bool,
    /// When the provider captured the reading
    pub captured_at: DateTime<Utc>,
}

impl PitchSample {
    /// Sample stamped with the current time
    pub fn new(pitch: f64, landscape: bool) -> Self {
        Self::at(pitch, landscape, Utc::now())
    }

    pub fn at(pitch: f64, landscape: bool, captured_at: DateTime<Utc>) -> Self {
        Self {
            pitch,
            landscape,
            captured_at,
        }
    }

    /// NaN or infinite pitch counts as "no sample"
    pub fn is_valid(&self) -> bool {
        self.pitch.is_finite()
    }
}

/// Answer given for the current prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionEvent {
    /// Tilt down: the prompt was guessed
    Correct,
    /// Tilt up: skip the prompt
    Pass,
}

impl ActionEvent {
    /// Haptic pattern the host should play
    pub fn feedback(&self) -> Feedback {
        match self {
            ActionEvent::Correct => Feedback::Success,
            ActionEvent::Pass => Feedback::Warning,
        }
    }
}

impl std::fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionEvent::Correct => write!(f, "CORRECT"),
            ActionEvent::Pass => write!(f, "PASS"),
        }
    }
}

/// Notification-style haptic feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Success,
    Warning,
}
