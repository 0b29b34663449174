use std::sync::Arc;
use std::time::Duration;

use assetr_common::inventory::scan::ScanStatus;
use assetr_core::adapters::json_file::JsonScanStatusFile;
use assetr_core::polling::{PollOutcome, ScanPoller};
use serde_json::json;
use tokio::sync::mpsc;

use crate::support::scratch_path;

const TICK: Duration = Duration::from_millis(20);

/// This test verifies that the poller follows a scan through a status file
/// and stops on its own once the scanner reports idle.
#[tokio::test]
async fn follows_file_until_idle() {
    let path = scratch_path("scan-status.json");
    let running = json!({ "active": true, "scan_id": "s-9", "progress": 40.0, "hosts_found": 3 });
    tokio::fs::write(&path, running.to_string()).await.unwrap();

    let poller = ScanPoller::new(Arc::new(JsonScanStatusFile::new(&path)), TICK);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = poller.spawn(tx);

    let first: ScanStatus = rx.recv().await.unwrap();
    assert!(first.active);
    assert_eq!(first.hosts_found, Some(3));

    let done = json!({ "active": false, "scan_id": "s-9", "hosts_found": 12 });
    tokio::fs::write(&path, done.to_string()).await.unwrap();

    let outcome = tokio::time::timeout(Duration::from_secs(5), handle.join())
        .await
        .unwrap()
        .unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    match outcome {
        PollOutcome::Idle(status) => assert_eq!(status.hosts_found, Some(12)),
        PollOutcome::Cancelled => panic!("poller should have seen the idle status"),
    }
}

#[tokio::test]
async fn missing_status_file_is_idle_immediately() {
    let poller = ScanPoller::new(
        Arc::new(JsonScanStatusFile::new(scratch_path("never-written.json"))),
        TICK,
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = poller.spawn(tx);

    assert_eq!(rx.recv().await, Some(ScanStatus::idle()));
    assert_eq!(handle.join().await.unwrap(), PollOutcome::Idle(ScanStatus::idle()));
}

#[tokio::test]
async fn cancel_ends_a_running_watch() {
    let path = scratch_path("scan-forever.json");
    tokio::fs::write(&path, json!({ "active": true }).to_string()).await.unwrap();

    let poller = ScanPoller::new(Arc::new(JsonScanStatusFile::new(&path)), TICK);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = poller.spawn(tx);

    assert!(rx.recv().await.is_some());
    handle.cancel();
    let outcome = handle.join().await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled);
}
