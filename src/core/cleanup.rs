//! CleanupTracker: points for picking up detected trash
//!
//! The camera screen offers a single "Pick" action for the first category in
//! the latest report. Each pick is worth `PICK_POINTS`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::types::DetectionReport;
use crate::PICK_POINTS;

#[derive(Debug, Clone, Default)]
pub struct CleanupTracker {
    score: u32,
    picks: BTreeMap<String, u32>,
}

impl CleanupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category the pick button would act on
    pub fn pickable(report: &DetectionReport) -> Option<&str> {
        report.categories.first()
    }

    /// Pick the first detected category. Returns it, or `None` (score
    /// unchanged) when nothing is detected.
    pub fn pick(&mut self, report: &DetectionReport) -> Option<String> {
        let Some(category) = Self::pickable(report) else {
            debug!(frame = report.frame, "nothing to pick");
            return None;
        };

        self.score += PICK_POINTS;
        *self.picks.entry(category.to_string()).or_insert(0) += 1;
        Some(category.to_string())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// How many times each category was picked
    pub fn picks(&self) -> &BTreeMap<String, u32> {
        &self.picks
    }

    pub fn total_picks(&self) -> u32 {
        self.picks.values().sum()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
