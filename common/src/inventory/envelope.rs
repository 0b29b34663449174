use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::inventory::device::ScanProvenance;

/// A single discovery as delivered by the scanner.
///
/// Only `id` is required. The top-level fields are the scanner's own summary and
/// take precedence; `scan_data` is the raw payload and may have any shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEnvelope {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub hostname: Option<String>,
    pub primary_ip: Option<String>,
    pub mac_address: Option<String>,
    pub os_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub provenance: ScanProvenance,
    #[serde(default)]
    pub scan_data: Value,
}

impl DiscoveryEnvelope {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_payload(mut self, scan_data: Value) -> Self {
        self.scan_data = scan_data;
        self
    }
}

/// Scanner backends disagree on whether ids are numbers or strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_sparse_envelope() {
        let envelope: DiscoveryEnvelope = serde_json::from_value(json!({
            "id": 42,
            "scan_id": "scan-7",
            "scan_data": { "ip": "10.0.0.9" }
        }))
        .unwrap();

        assert_eq!(envelope.id, "42");
        assert_eq!(envelope.hostname, None);
        assert_eq!(envelope.provenance.scan_id.as_deref(), Some("scan-7"));
        assert_eq!(envelope.scan_data["ip"], "10.0.0.9");
    }

    #[test]
    fn missing_payload_is_null() {
        let envelope: DiscoveryEnvelope =
            serde_json::from_value(json!({ "id": "d1" })).unwrap();
        assert!(envelope.scan_data.is_null());
    }

    #[test]
    fn rejects_object_id() {
        let result: Result<DiscoveryEnvelope, _> =
            serde_json::from_value(json!({ "id": { "nested": true } }));
        assert!(result.is_err());
    }
}
