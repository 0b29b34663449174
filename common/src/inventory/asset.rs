use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A device that lives in the managed inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub primary_ip: String,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    pub mac_address: Option<String>,
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub is_managed: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub labels: Vec<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// Create request handed to the conversion sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDraft {
    pub name: String,
    pub description: Option<String>,
    pub primary_ip: String,
    pub mac_address: Option<String>,
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_type: Option<String>,
    pub is_managed: bool,
    pub is_active: bool,
    pub ip_addresses: Vec<String>,
    pub labels: Vec<String>,
    pub location: Option<String>,
    pub department: Option<String>,
}

impl AssetDraft {
    /// Materializes the draft once the sink has assigned an identity.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> AssetRecord {
        AssetRecord {
            id,
            name: self.name,
            primary_ip: self.primary_ip,
            ip_addresses: self.ip_addresses,
            mac_address: self.mac_address,
            hostname: self.hostname,
            os_name: self.os_name,
            manufacturer: self.manufacturer,
            model: self.model,
            device_type: self.device_type,
            description: self.description,
            is_managed: self.is_managed,
            is_active: self.is_active,
            labels: self.labels,
            location: self.location,
            department: self.department,
            created_at,
        }
    }
}
