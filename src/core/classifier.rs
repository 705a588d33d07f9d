//! ClassifierFilter: raw detections → accepted trash categories
//!
//! A detection counts when its confidence is strictly above the threshold.
//! Its lowercased label is tested for substring containment against every
//! vocabulary entry; each entry it contains is accepted, so compound labels
//! can yield several categories.

use crate::config::DetectionConfig;
use crate::error::ConfigError;
use crate::types::{CategorySet, RawDetection, Vocabulary};
use crate::CONFIDENCE_THRESHOLD;

/// Pure per-frame filter
#[derive(Debug, Clone)]
pub struct ClassifierFilter {
    vocabulary: Vocabulary,
    threshold: f64,
}

impl Default for ClassifierFilter {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            threshold: CONFIDENCE_THRESHOLD,
        }
    }
}

impl ClassifierFilter {
    /// Create filter with default vocabulary and threshold (0.2)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create filter over a custom vocabulary
    pub fn with_vocabulary(vocabulary: Vocabulary, threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&threshold) {
            return Err(ConfigError::InvalidConfidenceThreshold(threshold));
        }
        Ok(Self {
            vocabulary,
            threshold,
        })
    }

    /// Build from validated detection config
    pub fn from_config(config: &DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let vocabulary = Vocabulary::new(&config.vocabulary)?;
        Self::with_vocabulary(vocabulary, config.confidence_threshold)
    }

    /// Resolve one frame's detections into categories
    pub fn filter(&self, batch: &[RawDetection]) -> CategorySet {
        let mut accepted = CategorySet::new();

        for detection in batch {
            if !self.accepts(detection.confidence) {
                continue;
            }
            let label = detection.label.to_lowercase();
            for entry in self.vocabulary.matches(&label) {
                accepted.insert(entry);
            }
        }

        accepted
    }

    /// Strict `>`: a detection exactly at the threshold is rejected
    pub fn accepts(&self, confidence: f64) -> bool {
        confidence > self.threshold
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

// =============================================================================
// TESTS
// =============================================================================
