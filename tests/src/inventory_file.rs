use assetr_common::inventory::device::ConversionStatus;
use assetr_core::adapters::json_file::{InventoryDocument, JsonInventoryFile};
use assetr_core::adapters::memory_sink::MemoryAssetSink;
use assetr_core::conversion::ConversionCoordinator;
use assetr_core::discovery::DiscoveryService;
use assetr_core::query;
use serde_json::json;

use crate::support::{scanner_export, scratch_path};

/// This test walks the whole flow the CLI performs: load a document, convert a
/// device, write the document back and load it again.
#[tokio::test]
async fn load_convert_save_reload() {
    let path = scratch_path("inventory.json");
    let doc = json!({
        "discoveries": scanner_export(),
        "assets": [
            { "id": "a1", "name": "core router", "primary_ip": "192.168.1.1", "is_active": true }
        ]
    });
    tokio::fs::write(&path, doc.to_string()).await.unwrap();

    let file = JsonInventoryFile::new(&path);
    let service = DiscoveryService::new(Box::new(file.clone()), Box::new(file));
    let mut set = service.load().await.unwrap();

    let converted = set.device_records();
    assert_eq!(query::filter(&converted, "status=converted").len(), 1);

    let sink = MemoryAssetSink::with_assets(set.assets().to_vec());
    let coordinator = ConversionCoordinator::new(Box::new(sink));

    // the router's IP is already an asset, so the sink refuses it
    assert!(coordinator.convert(&mut set, "102", None).await.is_err());
    coordinator.convert(&mut set, "105", None).await.unwrap();

    InventoryDocument::from(set).save(&path).await.unwrap();
    let reloaded = InventoryDocument::load(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(reloaded.discoveries.len(), 4);
    assert_eq!(reloaded.assets.len(), 2);
    assert!(reloaded.assets.iter().any(|a| a.name == "finance-pc"));

    let set: assetr_core::working_set::WorkingSet = reloaded.into();
    let records = set.device_records();
    assert!(records.iter().all(|r| r.id != "105"));
    assert_eq!(
        records.iter().find(|r| r.id == "102").map(|r| r.status),
        Some(ConversionStatus::Converted)
    );
}
