//! GestureGate: continuous pitch → discrete, debounced actions
//!
//! Armed + landscape + pitch < -threshold → Correct, disarm
//! Armed + landscape + pitch > +threshold → Pass, disarm
//!
//! Samples are taken in arrival order; `captured_at` is not compared.
//! The gate never re-arms itself. The game engine re-arms it once the next
//! prompt is on screen, so one physical tilt is counted exactly once.

use tracing::trace;

use crate::error::ConfigError;
use crate::types::{ActionEvent, PitchSample};
use crate::TILT_THRESHOLD;

#[derive(Debug, Clone)]
pub struct GestureGate {
    armed: bool,
    threshold: f64,
}

impl Default for GestureGate {
    fn default() -> Self {
        Self {
            armed: true,
            threshold: TILT_THRESHOLD,
        }
    }
}

impl GestureGate {
    /// Armed gate with the default ±0.5 rad threshold
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::InvalidTiltThreshold(threshold));
        }
        Ok(Self {
            threshold,
            ..Self::default()
        })
    }

    /// Feed one sample; at most one event per armed window
    pub fn process(&mut self, sample: &PitchSample) -> Option<ActionEvent> {
        if !sample.is_valid() {
            trace!(pitch = sample.pitch, "ignoring invalid pitch");
            return None;
        }
        if !self.armed || !sample.landscape {
            return None;
        }

        let event = if sample.pitch < -self.threshold {
            ActionEvent::Correct
        } else if sample.pitch > self.threshold {
            ActionEvent::Pass
        } else {
            return None;
        };

        self.armed = false;
        Some(event)
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn landscape(pitch: f64) -> PitchSample {
        PitchSample::new(pitch, true)
    }

    #[test]
    fn test_initially_armed() {
        assert!(GestureGate::new().is_armed());
    }

    #[test]
    fn test_tilt_down_is_correct() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&landscape(-0.8)), Some(ActionEvent::Correct));
        assert!(!gate.is_armed());
    }

    #[test]
    fn test_tilt_up_is_pass() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&landscape(0.9)), Some(ActionEvent::Pass));
        assert!(!gate.is_armed());
    }

    #[test]
    fn test_dead_zone_emits_nothing() {
        let mut gate = GestureGate::new();
        for pitch in [-0.5, -0.2, 0.0, 0.3, 0.5] {
            assert_eq!(gate.process(&landscape(pitch)), None);
        }
        assert!(gate.is_armed());
    }

    #[test]
    fn test_portrait_emits_nothing() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&PitchSample::new(-1.2, false)), None);
        assert!(gate.is_armed());
    }

    #[test]
    fn test_no_second_event_until_rearmed() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&landscape(-0.9)), Some(ActionEvent::Correct));

        // Device still tilted, or swinging the other way
        for pitch in [-0.9, -1.1, 0.8, 1.0] {
            assert_eq!(gate.process(&landscape(pitch)), None);
        }

        gate.arm();
        assert_eq!(gate.process(&landscape(0.8)), Some(ActionEvent::Pass));
    }

    #[test]
    fn test_held_tilt_fires_again_once_rearmed() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&landscape(-0.9)), Some(ActionEvent::Correct));
        assert_eq!(gate.process(&landscape(-0.9)), None);

        // No return to neutral needed
        gate.arm();
        assert_eq!(gate.process(&landscape(-0.9)), Some(ActionEvent::Correct));
    }

    #[test]
    fn test_invalid_sample_is_no_sample() {
        let mut gate = GestureGate::new();
        assert_eq!(gate.process(&landscape(f64::NAN)), None);
        assert!(gate.is_armed());
    }

    #[test]
    fn test_wall_clock_step_does_not_block_input() {
        let mut gate = GestureGate::new();
        let ahead = PitchSample::at(0.0, true, Utc::now() + Duration::hours(1));
        assert_eq!(gate.process(&ahead), None);

        // Clock stepped back: samples are taken in arrival order
        assert_eq!(gate.process(&landscape(-1.0)), Some(ActionEvent::Correct));
    }

    #[test]
    fn test_custom_threshold() {
        let mut gate = GestureGate::with_threshold(1.0).unwrap();
        assert_eq!(gate.process(&landscape(-0.8)), None);
        assert_eq!(gate.process(&landscape(-1.2)), Some(ActionEvent::Correct));

        assert!(GestureGate::with_threshold(-1.0).is_err());
    }
}
