use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used when no IP address could be recovered from a discovery.
pub const UNKNOWN_IP: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Router,
    Printer,
    Server,
    Workstation,
    NetworkDevice,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Router => "Router",
            DeviceType::Printer => "Printer",
            DeviceType::Server => "Server",
            DeviceType::Workstation => "Workstation",
            DeviceType::NetworkDevice => "Network Device",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a discovered device already has a matching asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionStatus {
    New,
    Converted,
}

impl ConversionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStatus::New => "New",
            ConversionStatus::Converted => "Converted",
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub number: u16,
    pub protocol: Option<String>,
    pub state: Option<String>,
    pub service: Option<String>,
}

impl From<u16> for Port {
    fn from(number: u16) -> Self {
        Self {
            number,
            protocol: None,
            state: None,
            service: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub port: Option<u16>,
    pub product: Option<String>,
    pub version: Option<String>,
}

/// Where a discovery came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProvenance {
    pub scan_id: Option<String>,
    pub scan_name: Option<String>,
    pub discovery_method: Option<String>,
}

/// Normalized view of a discovered device.
///
/// Rebuilt from its envelope on every recomputation, so `status` always reflects
/// the asset set it was built against and is never carried over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalDeviceRecord {
    pub id: String,
    pub hostname: Option<String>,
    /// Either a real address or [`UNKNOWN_IP`].
    pub ip_address: String,
    pub mac_address: Option<String>,
    pub os_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub last_seen: Option<String>,
    pub device_type: DeviceType,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub status: ConversionStatus,
    pub ports: Vec<Port>,
    pub services: Vec<Service>,
    pub provenance: ScanProvenance,
    pub raw_payload: Value,
}

impl CanonicalDeviceRecord {
    pub fn has_usable_ip(&self) -> bool {
        self.ip_address != UNKNOWN_IP
    }

    /// Confidence scaled to a whole percentage, as shown to operators.
    pub fn confidence_percent(&self) -> f64 {
        (self.confidence * 100.0).round()
    }

    pub fn port_numbers(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.iter().map(|port| port.number)
    }
}
