use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::{CanonicalDeviceRecord, ConversionStatus, DeviceType, UNKNOWN_IP};
use assetr_core::query::{self, SortSpec};
use assetr_core::working_set::WorkingSet;

use crate::support::{asset, envelopes};

fn records(assets: Vec<AssetRecord>) -> Vec<CanonicalDeviceRecord> {
    WorkingSet::new(envelopes(), assets).device_records()
}

fn ids(matched: &[&CanonicalDeviceRecord]) -> Vec<String> {
    matched.iter().map(|record| record.id.clone()).collect()
}

/// This test verifies that every envelope shape in a scanner export ends up as
/// a complete canonical record.
#[test]
fn export_builds_canonical_records() {
    let records = records(Vec::new());
    assert_eq!(records.len(), 5);

    let by_id = |id: &str| records.iter().find(|r| r.id == id).unwrap();

    let web = by_id("101");
    assert_eq!(web.device_type, DeviceType::Server);
    assert_eq!(web.confidence, 0.7);
    assert_eq!(web.os_name.as_deref(), Some("Ubuntu 22.04 LTS"));
    assert_eq!(web.port_numbers().collect::<Vec<_>>(), vec![22, 80, 443]);
    assert_eq!(web.provenance.scan_name.as_deref(), Some("nightly"));

    let router = by_id("102");
    assert_eq!(router.ip_address, "192.168.1.1");
    assert_eq!(router.device_type, DeviceType::Router);
    assert_eq!(router.model.as_deref(), Some("ISR4321"));
    assert_eq!(router.confidence, 0.6);

    assert_eq!(by_id("103").device_type, DeviceType::Printer);
    assert_eq!(by_id("105").device_type, DeviceType::Workstation);

    let bare = by_id("104");
    assert_eq!(bare.ip_address, UNKNOWN_IP);
    assert_eq!(bare.device_type, DeviceType::NetworkDevice);
    assert_eq!(bare.confidence, 0.0);

    assert!(records.iter().all(|r| r.status == ConversionStatus::New));
}

#[test]
fn field_queries_over_export() {
    let records = records(Vec::new());

    assert_eq!(ids(&query::filter(&records, "confidence>70")), vec!["105"]);
    assert_eq!(ids(&query::filter(&records, "confidence>=70")), vec!["101", "105"]);
    assert_eq!(ids(&query::filter(&records, "type=router")), vec!["102"]);
    assert_eq!(ids(&query::filter(&records, "TYPE=Printer")), vec!["103"]);
    assert_eq!(ids(&query::filter(&records, "last_seen>2024-06-01")), vec!["105"]);
    assert_eq!(ids(&query::filter(&records, "ports>=3")), vec!["101"]);
    assert_eq!(ids(&query::filter(&records, "services=ssh")), vec!["104"]);
    assert!(query::filter(&records, "unknownfield=x").is_empty());
}

#[test]
fn free_text_queries_over_export() {
    let records = records(Vec::new());

    assert_eq!(query::filter(&records, "").len(), 5);
    assert_eq!(ids(&query::filter(&records, "CISCO")), vec!["102"]);
    assert_eq!(ids(&query::filter(&records, "finance")), vec!["105"]);
    assert_eq!(ids(&query::filter(&records, "nightly")), vec!["101"]);
}

#[test]
fn status_follows_the_asset_set() {
    let records = records(vec![asset("a1", "core router", "192.168.1.1")]);

    assert_eq!(ids(&query::filter(&records, "status=converted")), vec!["102"]);
    assert_eq!(query::filter(&records, "status=new").len(), 4);
}

/// Sorting by confidence and toggling must reverse distinct keys exactly.
#[test]
fn sort_and_toggle() {
    let records = records(Vec::new());
    let spec = SortSpec::descending("confidence");

    let sorted = query::search(&records, "", Some(&spec));
    assert_eq!(ids(&sorted), vec!["105", "101", "102", "103", "104"]);

    let sorted = query::search(&records, "", Some(&spec.toggled()));
    assert_eq!(ids(&sorted), vec!["104", "103", "102", "101", "105"]);
}

#[test]
fn missing_dates_sort_first_and_keep_order() {
    let records = records(Vec::new());
    let sorted = query::search(&records, "", Some(&SortSpec::ascending("last_seen")));
    assert_eq!(ids(&sorted), vec!["101", "102", "104", "103", "105"]);
}

#[test]
fn asset_queries_use_asset_fields() {
    let mut spare = asset("a2", "spare switch", "10.0.0.2");
    spare.is_active = false;
    spare.labels = vec!["spares".into()];
    let assets = vec![asset("a1", "core router", "192.168.1.1"), spare];

    let inactive: Vec<&AssetRecord> = query::filter(&assets, "status=inactive");
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].id, "a2");

    assert_eq!(query::filter(&assets, "spares").len(), 1);
    assert_eq!(query::filter(&assets, "managed=true").len(), 2);
    assert_eq!(query::filter(&assets, "created<2024-02-01").len(), 2);

    let sorted = query::search(&assets, "", Some(&SortSpec::ascending("name")));
    assert_eq!(sorted[0].id, "a1");
}

#[test]
fn completion_round_trip() {
    let suggestions = query::suggest::<CanonicalDeviceRecord>("last");
    assert_eq!(suggestions.len(), 1);

    let completed = query::apply_suggestion("last", suggestions[0].key);
    assert_eq!(completed, "last_seen=");

    let records = records(Vec::new());
    let query_text = format!("{completed}2024-06-10T12:30:00Z");
    assert_eq!(ids(&query::filter(&records, &query_text)), vec!["105"]);
}
