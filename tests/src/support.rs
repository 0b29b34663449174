use std::sync::{Arc, Mutex};

use assetr_common::inventory::asset::{AssetDraft, AssetRecord};
use assetr_common::inventory::envelope::DiscoveryEnvelope;
use assetr_common::ports::conversion_sink::ConversionSink;
use async_trait::async_trait;
use serde_json::{Value, json};

/// A realistic scanner export: mixed id types, summary fields, nested payloads.
pub fn scanner_export() -> Value {
    json!([
        {
            "id": 101,
            "hostname": "ubuntu-web",
            "primary_ip": "192.168.1.10",
            "scan_id": "s-1",
            "scan_name": "nightly",
            "scan_data": {
                "os_info": { "os_name": "Ubuntu 22.04 LTS" },
                "ports": [22, 80, { "port": 443, "protocol": "tcp", "state": "open" }]
            }
        },
        {
            "id": "102",
            "scan_data": {
                "ip": "192.168.1.1",
                "addresses": { "mac": "00:11:22:33:44:55" },
                "device_info": { "manufacturer": "Cisco Systems", "model": "ISR4321" },
                "hostname": "core-rtr"
            }
        },
        {
            "id": 103,
            "primary_ip": "192.168.1.40",
            "manufacturer": "HP",
            "scan_data": { "ports": [9100], "last_seen": "2024-05-01T08:00:00Z" }
        },
        {
            "id": 104,
            "scan_data": { "services": ["ssh"] }
        },
        {
            "id": 105,
            "hostname": "finance-pc",
            "primary_ip": "192.168.1.77",
            "os_name": "Windows 11 Pro",
            "manufacturer": "Dell",
            "mac_address": "aa:bb:cc:dd:ee:ff",
            "last_seen": "2024-06-10T12:30:00Z"
        }
    ])
}

pub fn envelopes() -> Vec<DiscoveryEnvelope> {
    serde_json::from_value(scanner_export()).expect("fixture must deserialize")
}

pub fn asset(id: &str, name: &str, primary_ip: &str) -> AssetRecord {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "primary_ip": primary_ip,
        "ip_addresses": [primary_ip],
        "is_active": true,
        "is_managed": true,
        "created_at": "2024-01-15T09:00:00Z"
    }))
    .expect("asset fixture must deserialize")
}

/// Sink that accepts everything except the IPs it was told to refuse, and
/// records every draft it sees. Clones share the record.
#[derive(Clone, Default)]
pub struct RecordingSink {
    refuse: Vec<String>,
    drafts: Arc<Mutex<Vec<AssetDraft>>>,
}

impl RecordingSink {
    pub fn refusing(ips: &[&str]) -> Self {
        Self {
            refuse: ips.iter().map(|ip| ip.to_string()).collect(),
            drafts: Arc::default(),
        }
    }

    pub fn drafts(&self) -> Vec<AssetDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversionSink for RecordingSink {
    async fn create_asset(&self, draft: AssetDraft) -> anyhow::Result<AssetRecord> {
        self.drafts.lock().unwrap().push(draft.clone());
        if self.refuse.contains(&draft.primary_ip) {
            anyhow::bail!("primary_ip {} is already assigned", draft.primary_ip);
        }
        let id = format!("asset-{}", draft.primary_ip);
        Ok(draft.into_record(id, Default::default()))
    }
}

pub fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("assetr-it-{}-{name}", std::process::id()))
}
