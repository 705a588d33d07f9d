//! Integration tests for the detection pipeline
//!
//! Tests the full path: text frame → FrameParser → DetectionStream → subscribers

use std::sync::{Arc, Barrier, Mutex};

use ecorangers::config::DetectionConfig;
use ecorangers::core::{ClassifierFilter, CleanupTracker, DetectionStream, FrameParser};
use ecorangers::types::{CategorySet, FrameOutcome, RawDetection};
use ecorangers::CONFIDENCE_THRESHOLD;
use pretty_assertions::assert_eq;

/// Confidence at or below the threshold is excluded regardless of label
#[test]
fn test_threshold_property_over_labels() {
    let filter = ClassifierFilter::new();
    let labels = ["bottle", "Wine Glass", "aluminum foil wrapper", "paper cup"];
    let confidences = [0.0, 0.05, 0.1, 0.15, 0.19, CONFIDENCE_THRESHOLD];

    for label in labels {
        for c in confidences {
            let set = filter.filter(&[RawDetection::new(label, c)]);
            assert!(set.is_empty(), "{} at {} should be rejected", label, c);
        }
    }
}

/// Above the threshold, every vocabulary entry in the label is included
#[test]
fn test_every_contained_entry_included() {
    let filter = ClassifierFilter::new();
    for c in [0.21, 0.5, 0.99, 1.0] {
        let set = filter.filter(&[RawDetection::new("aluminum foil wrapper", c)]);
        let expected: CategorySet = ["aluminum foil", "wrapper"].into_iter().collect();
        assert_eq!(set, expected);
    }
}

/// Filter twice over the same batch: identical result
#[test]
fn test_filter_idempotent_over_batches() {
    let parser = FrameParser::new();
    let filter = ClassifierFilter::new();
    let lines = [
        "bottle=0.9, person=0.95, cup=0.2",
        "hot dog=0.4, pizza=0.41, dining table=0.8",
        "",
        "Banana=0.3, BANANA=0.7",
    ];

    for line in lines {
        let batch = parser.parse_detections(line);
        assert_eq!(filter.filter(&batch), filter.filter(&batch));
    }
}

/// Every published frame reaches the subscriber, failures included
#[tokio::test]
async fn test_subscriber_notified_for_every_frame() {
    let stream = DetectionStream::default();
    let parser = FrameParser::new();
    let mut sub = stream.subscribe();

    let frames = ["bottle=0.9", "!camera busy", "", "cup=0.1", "can=0.5, straw=0.6"];
    for line in frames {
        stream.publish(parser.parse(line));
    }

    let mut reports = Vec::new();
    for _ in 0..frames.len() {
        reports.push(sub.recv().await.unwrap());
    }

    let numbers: Vec<u64> = reports.iter().map(|r| r.frame).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    assert!(reports[0].categories.contains("bottle"));
    assert!(reports[1].categories.is_empty());
    assert_eq!(reports[1].diagnostic, "No results. Error: camera busy");
    assert!(reports[2].categories.is_empty());
    assert!(!reports[2].is_degraded());
    assert!(reports[3].categories.is_empty());
    assert_eq!(reports[4].categories.len(), 2);
}

/// Stream keeps running after an upstream failure
#[test]
fn test_recovers_after_failure() {
    let stream = DetectionStream::default();
    stream.publish(FrameOutcome::Failed("timeout".to_string()));
    let report = stream.publish(vec![RawDetection::new("fork", 0.8)]);

    assert!(!report.is_degraded());
    assert!(report.categories.contains("fork"));
    assert_eq!(stream.latest().unwrap().frame, 2);
}

/// Handler-based subscription runs serially on its own task
#[tokio::test]
async fn test_subscribe_with_handler() {
    let stream = DetectionStream::default();
    let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let task = stream.subscribe_with(move |report| {
        sink.lock().unwrap().push(report.frame);
    });

    for _ in 0..3 {
        stream.publish(FrameOutcome::Detections(vec![]));
    }
    drop(stream);
    task.await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
}

/// Concurrent producers: every subscriber sees strictly increasing frames
/// and finishes on the same frame as `latest()`
#[test]
fn test_concurrent_publishers() {
    let stream = Arc::new(DetectionStream::default());
    let mut subs = vec![stream.subscribe(), stream.subscribe()];
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let stream = Arc::clone(&stream);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for j in 0..10 {
                    let label = if (i + j) % 2 == 0 { "can" } else { "cup" };
                    stream.publish(vec![RawDetection::new(label, 0.9)]);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let latest = stream.latest().unwrap();
    for sub in subs.iter_mut() {
        let mut frames = Vec::new();
        while let Some(report) = sub.try_recv() {
            frames.push(report.frame);
        }
        assert_eq!(frames, (1..=40).collect::<Vec<u64>>());
        assert_eq!(frames.last().copied(), Some(latest.frame));
    }
    assert_eq!(stream.frame_count(), 40);
}

/// Custom config: vocabulary + threshold flow through
#[test]
fn test_filter_from_config() {
    let config = DetectionConfig {
        confidence_threshold: 0.5,
        vocabulary: vec!["Glass".to_string(), "wine".to_string()],
    };
    let filter = ClassifierFilter::from_config(&config).unwrap();

    let set = filter.filter(&[
        RawDetection::new("wine glass", 0.6),
        RawDetection::new("bottle", 0.9),
        RawDetection::new("glass", 0.5),
    ]);
    let expected: CategorySet = ["glass", "wine"].into_iter().collect();
    assert_eq!(set, expected);
}

/// Camera screen flow: detect, pick, nothing left
#[test]
fn test_pick_flow() {
    let stream = DetectionStream::default();
    let parser = FrameParser::new();
    let mut tracker = CleanupTracker::new();

    let report = stream.publish(parser.parse("plastic bag=0.7, person=0.9"));
    assert_eq!(tracker.pick(&report).as_deref(), Some("plastic bag"));

    let report = stream.publish(parser.parse("!lost focus"));
    assert!(tracker.pick(&report).is_none());

    assert_eq!(tracker.score(), 10);
}
