//! Tests for verifying command metrics.

#![cfg(feature = "metrics")]

mod common;

use common::RecordingSink;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use redline_core::{Command, CommandInterceptor};

type SnapshotEntry = (
    CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
);

/// Find a counter in entries by name and connection label.
fn find_counter(entries: &[SnapshotEntry], name: &str, connection: &str) -> Option<u64> {
    for (key, _, _, value) in entries {
        if key.kind() == MetricKind::Counter && key.key().name() == name {
            for label in key.key().labels() {
                if label.key() == "connection"
                    && label.value() == connection
                    && let DebugValue::Counter(v) = *value
                {
                    return Some(v);
                }
            }
        }
    }
    None
}

/// Find a histogram in entries by name and connection label, return sample count.
fn histogram_count(entries: &[SnapshotEntry], name: &str, connection: &str) -> usize {
    for (key, _, _, value) in entries {
        if key.kind() == MetricKind::Histogram && key.key().name() == name {
            for label in key.key().labels() {
                if label.key() == "connection"
                    && label.value() == connection
                    && let DebugValue::Histogram(v) = value
                {
                    return v.len();
                }
            }
        }
    }
    0
}

#[test]
fn test_command_metrics_per_connection() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let mut interceptor = CommandInterceptor::with_sink(RecordingSink::new());
        interceptor.on_command_start(Command::new("GET"), None, Some("primary"));
        interceptor.on_command_stop(None).unwrap();
        interceptor.on_command_start(Command::new("SET"), None, Some("primary"));
        interceptor
            .on_command_stop(Some("READONLY".to_owned()))
            .unwrap();
    });

    let entries = snapshotter.snapshot().into_vec();

    assert_eq!(
        find_counter(&entries, "redline_commands_total", "primary"),
        Some(2)
    );
    assert_eq!(
        find_counter(&entries, "redline_command_errors_total", "primary"),
        Some(1)
    );
    assert_eq!(
        histogram_count(&entries, "redline_command_duration_seconds", "primary"),
        2
    );
}

#[test]
fn test_no_metrics_without_sink() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let mut interceptor = CommandInterceptor::new();
        interceptor.on_command_start(Command::new("GET"), None, Some("primary"));
        interceptor.on_command_stop(None).unwrap();
    });

    let entries = snapshotter.snapshot().into_vec();
    assert_eq!(find_counter(&entries, "redline_commands_total", "primary"), None);
}
