//! Turns a discovery envelope into canonical identity fields.
//!
//! Every field is resolved through a fallback chain: the envelope summary first,
//! then one or more locations inside the raw `scan_data` payload. The first
//! candidate that is present and not blank wins. Missing intermediate objects,
//! wrong JSON types and blank strings all count as "absent".

use assetr_common::inventory::device::{Port, Service, UNKNOWN_IP};
use assetr_common::inventory::envelope::DiscoveryEnvelope;
use serde_json::{Map, Value};

/// Identity fields of a device, before classification and scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityFields {
    pub hostname: Option<String>,
    pub ip_address: String,
    pub mac_address: Option<String>,
    pub os_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub last_seen: Option<String>,
    pub ports: Vec<Port>,
    pub services: Vec<Service>,
}

pub fn normalize(envelope: &DiscoveryEnvelope) -> IdentityFields {
    IdentityFields {
        hostname: hostname(envelope),
        ip_address: ip_address(envelope),
        mac_address: mac_address(envelope),
        os_name: os_name(envelope),
        manufacturer: manufacturer(envelope),
        model: model(envelope),
        last_seen: last_seen(envelope),
        ports: ports(&envelope.scan_data),
        services: services(&envelope.scan_data),
    }
}

pub fn hostname(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.hostname.as_deref(),
        text_at(&envelope.scan_data, "/hostname"),
    ])
}

/// Falls back to [`UNKNOWN_IP`] so the field is never empty.
pub fn ip_address(envelope: &DiscoveryEnvelope) -> String {
    first_present([
        envelope.primary_ip.as_deref(),
        text_at(&envelope.scan_data, "/ip"),
        text_at(&envelope.scan_data, "/ip_address"),
    ])
    .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

pub fn mac_address(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.mac_address.as_deref(),
        text_at(&envelope.scan_data, "/addresses/mac"),
    ])
}

pub fn os_name(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.os_name.as_deref(),
        text_at(&envelope.scan_data, "/os_info/os_name"),
        text_at(&envelope.scan_data, "/os_info/os_details"),
    ])
}

pub fn manufacturer(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.manufacturer.as_deref(),
        text_at(&envelope.scan_data, "/device_info/manufacturer"),
        text_at(&envelope.scan_data, "/vendor"),
    ])
}

pub fn model(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.model.as_deref(),
        text_at(&envelope.scan_data, "/device_info/model"),
    ])
}

pub fn last_seen(envelope: &DiscoveryEnvelope) -> Option<String> {
    first_present([
        envelope.last_seen.as_deref(),
        text_at(&envelope.scan_data, "/last_seen"),
    ])
}

/// Reads `ports[]`, accepting bare numbers or objects keyed by `port`, `number` or `portid`.
///
/// Entries without a valid port number are dropped.
pub fn ports(payload: &Value) -> Vec<Port> {
    let Some(entries) = payload.pointer("/ports").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(obj) => {
                let number = ["port", "number", "portid"]
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(port_number))?;
                Some(Port {
                    number,
                    protocol: obj_text(obj, "protocol"),
                    state: obj_text(obj, "state"),
                    service: obj_text(obj, "service").or_else(|| {
                        obj.get("service")
                            .and_then(|svc| svc.get("name"))
                            .and_then(Value::as_str)
                            .and_then(non_blank)
                            .map(str::to_string)
                    }),
                })
            }
            other => port_number(other).map(Port::from),
        })
        .collect()
}

/// Reads `services[]`, accepting bare names or objects keyed by `name` or `service`.
pub fn services(payload: &Value) -> Vec<Service> {
    let Some(entries) = payload.pointer("/services").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => non_blank(name).map(|name| Service {
                name: name.to_string(),
                port: None,
                product: None,
                version: None,
            }),
            Value::Object(obj) => {
                let name = obj_text(obj, "name").or_else(|| obj_text(obj, "service"))?;
                Some(Service {
                    name,
                    port: obj.get("port").and_then(port_number),
                    product: obj_text(obj, "product"),
                    version: obj_text(obj, "version"),
                })
            }
            _ => None,
        })
        .collect()
}

fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find_map(non_blank)
        .map(str::to_string)
}

fn text_at<'a>(payload: &'a Value, pointer: &str) -> Option<&'a str> {
    payload.pointer(pointer).and_then(Value::as_str)
}

fn obj_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .and_then(non_blank)
        .map(str::to_string)
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn port_number(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}
