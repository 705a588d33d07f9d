//! DetectionStream: per-frame classification fanned out to subscribers
//!
//! `publish` runs the filter synchronously on the caller's thread, then numbers
//! the report and hands it to a broadcast channel in one locked step. Each subscriber drains its own receiver,
//! so a handler never runs concurrently with itself and concurrent publishers
//! never touch the subscriber set directly. An upstream failure still yields a
//! report (empty categories + diagnostic) so consumers never go stale.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::ClassifierFilter;
use crate::types::{CategorySet, DetectionReport, FrameOutcome};
use crate::{DIAGNOSTIC_RUNNING, UPDATE_CHANNEL_CAPACITY};

/// Diagnostic for a frame the classifier could not resolve
pub fn failure_diagnostic(reason: &str) -> String {
    let reason = reason.trim();
    let reason = if reason.is_empty() { "Unknown error" } else { reason };
    format!("No results. Error: {}", reason)
}

#[derive(Debug)]
pub struct DetectionStream {
    filter: ClassifierFilter,
    update_tx: broadcast::Sender<DetectionReport>,
    latest: watch::Sender<Option<DetectionReport>>,
    frames: AtomicU64,
}

impl Default for DetectionStream {
    fn default() -> Self {
        Self::new(ClassifierFilter::default())
    }
}

impl DetectionStream {
    pub fn new(filter: ClassifierFilter) -> Self {
        let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let (latest, _) = watch::channel(None);
        Self {
            filter,
            update_tx,
            latest,
            frames: AtomicU64::new(0),
        }
    }

    /// Register a consumer; it sees every report published from now on
    pub fn subscribe(&self) -> DetectionSubscription {
        DetectionSubscription {
            rx: self.update_tx.subscribe(),
        }
    }

    /// Drive `handler` on its own task, one report at a time, until the
    /// stream is dropped. Must be called from within a tokio runtime.
    pub fn subscribe_with<F>(&self, mut handler: F) -> JoinHandle<()>
    where
        F: FnMut(DetectionReport) + Send + 'static,
    {
        let mut subscription = self.subscribe();
        tokio::spawn(async move {
            while let Some(report) = subscription.recv().await {
                handler(report);
            }
        })
    }

    /// Process one camera frame. Never fails; degraded frames are reported.
    ///
    /// Classification runs outside any lock. Numbering, the latest-value
    /// update and the broadcast happen under the watch write lock, so every
    /// subscriber sees frames in strictly increasing order.
    pub fn publish(&self, outcome: impl Into<FrameOutcome>) -> DetectionReport {
        let (mut report, failure) = match outcome.into() {
            FrameOutcome::Detections(batch) => {
                let categories = self.filter.filter(&batch);
                (DetectionReport::new(0, categories, DIAGNOSTIC_RUNNING), None)
            }
            FrameOutcome::Failed(reason) => {
                let diagnostic = failure_diagnostic(&reason);
                (DetectionReport::new(0, CategorySet::new(), diagnostic), Some(reason))
            }
        };

        self.latest.send_modify(|current| {
            report.frame = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
            if self.update_tx.send(report.clone()).is_err() {
                debug!(frame = report.frame, "no detection subscribers");
            }
            *current = Some(report.clone());
        });

        if let Some(reason) = failure {
            warn!(frame = report.frame, %reason, "classifier produced no result");
        }
        report
    }

    /// Most recent report, if any frame has been published
    pub fn latest(&self) -> Option<DetectionReport> {
        self.latest.borrow().clone()
    }

    /// Frames published so far
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    pub fn filter(&self) -> &ClassifierFilter {
        &self.filter
    }
}

/// Receiving end for one consumer
#[derive(Debug)]
pub struct DetectionSubscription {
    rx: broadcast::Receiver<DetectionReport>,
}

impl DetectionSubscription {
    /// Next report, or `None` once the stream is gone.
    /// A consumer that falls behind skips straight to the newest reports.
    pub async fn recv(&mut self) -> Option<DetectionReport> {
        loop {
            match self.rx.recv().await {
                Ok(report) => return Some(report),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "detection subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant for hosts that poll from a UI loop
    pub fn try_recv(&mut self) -> Option<DetectionReport> {
        loop {
            match self.rx.try_recv() {
                Ok(report) => return Some(report),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "detection subscriber lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
