//! Classifier input and output structures

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One classifier observation for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Top label reported by the model (any case)
    pub label: String,
    /// Model confidence: 0.0-1.0
    pub confidence: f64,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// What the upstream classifier produced for one camera frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Observations for the frame (possibly none)
    Detections(Vec<RawDetection>),
    /// The classifier produced no result; carries its error description
    Failed(String),
}

impl From<Vec<RawDetection>> for FrameOutcome {
    fn from(batch: Vec<RawDetection>) -> Self {
        FrameOutcome::Detections(batch)
    }
}

/// Accepted category names for one frame
///
/// Ordered so that "first detected" is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the category was not already present
    pub fn insert(&mut self, category: impl Into<String>) -> bool {
        self.0.insert(category.into())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The category a "pick" acts on
    pub fn first(&self) -> Option<&str> {
        self.0.iter().next().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Notification delivered to detection subscribers once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Frame sequence number, starting at 1
    pub frame: u64,
    /// Accepted categories (empty on upstream failure)
    pub categories: CategorySet,
    /// Human-readable status of the detection loop
    pub diagnostic: String,
    /// When the frame was resolved
    pub timestamp: DateTime<Utc>,
}

impl DetectionReport {
    pub fn new(frame: u64, categories: CategorySet, diagnostic: impl Into<String>) -> Self {
        Self {
            frame,
            categories,
            diagnostic: diagnostic.into(),
            timestamp: Utc::now(),
        }
    }

    /// Did this frame come from a degraded classifier?
    pub fn is_degraded(&self) -> bool {
        self.diagnostic != crate::DIAGNOSTIC_RUNNING
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let names: Vec<&str> = self.categories.iter().collect();
        format!(
            "frame={} | detected=[{}] | {}",
            self.frame,
            names.join(", "),
            self.diagnostic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_set_collapses_duplicates() {
        let mut set = CategorySet::new();
        assert!(set.insert("can"));
        assert!(!set.insert("can"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_first_is_alphabetical() {
        let set: CategorySet = ["straw", "bottle", "cup"].into_iter().collect();
        assert_eq!(set.first(), Some("bottle"));
        assert_eq!(CategorySet::new().first(), None);
    }

    #[test]
    fn test_report_degraded_flag() {
        let ok = DetectionReport::new(1, CategorySet::new(), crate::DIAGNOSTIC_RUNNING);
        assert!(!ok.is_degraded());

        let failed = DetectionReport::new(2, CategorySet::new(), "No results. Error: busy");
        assert!(failed.is_degraded());
    }

    #[test]
    fn test_parseable_string() {
        let set: CategorySet = ["cup", "can"].into_iter().collect();
        let report = DetectionReport::new(7, set, crate::DIAGNOSTIC_RUNNING);
        assert_eq!(
            report.to_parseable_string(),
            "frame=7 | detected=[can, cup] | Detection running"
        );
    }
}
