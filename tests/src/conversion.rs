use assetr_common::config::Config;
use assetr_common::error::ConversionError;
use assetr_common::inventory::device::ConversionStatus;
use assetr_core::conversion::{AssetOverrides, ConversionCoordinator};
use assetr_core::pipeline;
use assetr_core::selection::Selection;
use assetr_core::working_set::WorkingSet;

use crate::support::{RecordingSink, envelopes};

fn working_set() -> WorkingSet {
    WorkingSet::new(envelopes(), Vec::new())
}

/// This test verifies that a converted device leaves the discovered set, shows
/// up as an asset and cannot be converted a second time.
#[tokio::test]
async fn convert_once_then_not_found() {
    let sink = RecordingSink::default();
    let coordinator = ConversionCoordinator::new(Box::new(sink.clone()));
    let mut set = working_set();

    let asset = coordinator.convert(&mut set, "101", None).await.unwrap();
    assert_eq!(asset.name, "ubuntu-web");
    assert_eq!(asset.primary_ip, "192.168.1.10");
    assert_eq!(asset.description.as_deref(), Some("Server discovered with 70% confidence"));
    assert!(asset.is_managed);
    assert!(asset.is_active);

    assert!(!set.contains_device("101"));
    assert_eq!(set.discovered().len(), 4);
    assert_eq!(set.assets().len(), 1);

    let again = coordinator.convert(&mut set, "101", None).await.unwrap_err();
    assert_eq!(again, ConversionError::NotFound { device_id: "101".into() });
    assert_eq!(sink.drafts().len(), 1);
}

#[tokio::test]
async fn unknown_ip_never_reaches_the_sink() {
    let sink = RecordingSink::default();
    let coordinator = ConversionCoordinator::new(Box::new(sink.clone()));
    let mut set = working_set();

    let err = coordinator.convert(&mut set, "104", None).await.unwrap_err();

    assert_eq!(err, ConversionError::InvalidIdentity { device_id: "104".into() });
    assert!(sink.drafts().is_empty());
    assert_eq!(set, working_set());
}

#[tokio::test]
async fn name_falls_back_to_ip() {
    let coordinator = ConversionCoordinator::new(Box::new(RecordingSink::default()));
    let mut set = working_set();

    let asset = coordinator.convert(&mut set, "103", None).await.unwrap();
    assert_eq!(asset.name, "192.168.1.40");
    assert_eq!(asset.manufacturer.as_deref(), Some("HP"));
    assert_eq!(asset.device_type.as_deref(), Some("Printer"));
}

#[tokio::test]
async fn config_sets_managed_flag_and_labels() {
    let cfg = Config {
        mark_managed: false,
        default_labels: vec!["discovered".into()],
        ..Config::default()
    };
    let coordinator = ConversionCoordinator::with_config(Box::new(RecordingSink::default()), &cfg);
    let mut set = working_set();

    let asset = coordinator.convert(&mut set, "105", None).await.unwrap();
    assert!(!asset.is_managed);
    assert_eq!(asset.labels, vec!["discovered".to_string()]);

    let overrides = AssetOverrides {
        labels: Some(vec!["finance".into()]),
        is_managed: Some(true),
        ..Default::default()
    };
    let asset = coordinator.convert(&mut set, "101", Some(&overrides)).await.unwrap();
    assert!(asset.is_managed);
    assert_eq!(asset.labels, vec!["finance".to_string()]);
}

/// One rejected item must not stop the rest of the batch.
#[tokio::test]
async fn batch_with_one_rejection() {
    let sink = RecordingSink::refusing(&["192.168.1.1"]);
    let coordinator = ConversionCoordinator::new(Box::new(sink.clone()));
    let mut set = working_set();
    let mut selection: Selection = ["101", "102", "103"].into_iter().collect();

    let report = coordinator.convert_batch(&mut set, &mut selection, None).await;

    assert_eq!(report.success_count, 2);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].item_id, "102");
    assert!(report.errors[0].message.contains("already assigned"));

    assert_eq!(selection.ids(), ["102"]);
    assert_eq!(sink.drafts().len(), 3);
    assert_eq!(set.assets().len(), 2);
    assert!(set.contains_device("102"));
    assert!(!set.contains_device("101"));
    assert!(!set.contains_device("103"));
}

#[tokio::test]
async fn batch_reports_missing_and_unusable_items() {
    let coordinator = ConversionCoordinator::new(Box::new(RecordingSink::default()));
    let mut set = working_set();
    let mut selection: Selection = ["104", "999", "105"].into_iter().collect();

    let report = coordinator.convert_batch(&mut set, &mut selection, None).await;

    assert_eq!(report.success_count, 1);
    assert_eq!(report.failure_count, 2);
    let failed: Vec<&str> = report.errors.iter().map(|e| e.item_id.as_str()).collect();
    assert_eq!(failed, vec!["104", "999"]);
    assert_eq!(selection.ids(), ["104", "999"]);
}

/// Status is derived from the asset set each time, not stored on the envelope.
#[tokio::test]
async fn status_flips_after_conversion_without_touching_envelopes() {
    let coordinator = ConversionCoordinator::new(Box::new(RecordingSink::default()));
    let all = envelopes();
    let mut set = WorkingSet::new(all.clone(), Vec::new());

    coordinator.convert(&mut set, "105", None).await.unwrap();

    let before = pipeline::build_records(&all, &[]);
    let after = pipeline::build_records(&all, set.assets());

    let status_of = |records: &[assetr_common::inventory::device::CanonicalDeviceRecord], id: &str| {
        records.iter().find(|r| r.id == id).map(|r| r.status)
    };
    assert_eq!(status_of(&before, "105"), Some(ConversionStatus::New));
    assert_eq!(status_of(&after, "105"), Some(ConversionStatus::Converted));
    assert_eq!(status_of(&after, "101"), Some(ConversionStatus::New));
    assert_eq!(all, envelopes());
}
