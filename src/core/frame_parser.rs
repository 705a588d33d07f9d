//! Frame parser: text lines → classifier outcomes
//!
//! Line format used by the CLI host and fixtures:
//! - `wine glass=0.81, person=0.40`   one frame, label=confidence pairs
//! - `!model unavailable`             upstream failure with reason
//! - empty line                       frame with no detections
//!
//! Malformed pairs are skipped; a frame is never rejected outright.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::types::{FrameOutcome, RawDetection};

lazy_static! {
    static ref RE_PAIR: Regex = Regex::new(
        r"^\s*(?P<label>[^=,]*?)\s*=\s*(?P<confidence>[0-9]*\.?[0-9]+)\s*$"
    ).unwrap();
}

/// Prefix marking an upstream failure line
pub const FAILURE_PREFIX: char = '!';

#[derive(Debug, Default)]
pub struct FrameParser;

impl FrameParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line into a frame outcome
    pub fn parse(&self, line: &str) -> FrameOutcome {
        let line = line.trim();

        if let Some(reason) = line.strip_prefix(FAILURE_PREFIX) {
            return FrameOutcome::Failed(reason.trim().to_string());
        }

        FrameOutcome::Detections(self.parse_detections(line))
    }

    /// Parse only the label=confidence pairs
    pub fn parse_detections(&self, line: &str) -> Vec<RawDetection> {
        line.split(',')
            .filter(|pair| !pair.trim().is_empty())
            .filter_map(|pair| {
                let parsed = parse_pair(pair);
                if parsed.is_none() {
                    trace!(pair, "skipping malformed detection");
                }
                parsed
            })
            .collect()
    }
}

fn parse_pair(pair: &str) -> Option<RawDetection> {
    let caps = RE_PAIR.captures(pair)?;
    let label = caps.name("label")?.as_str();
    let confidence: f64 = caps.name("confidence")?.as_str().parse().ok()?;
    if !(0.0..=1.0).contains(&confidence) {
        return None;
    }
    Some(RawDetection::new(label, confidence))
}

// =============================================================================
// TESTS
// =============================================================================
