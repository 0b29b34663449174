//! Whether a discovered device already exists as an asset.
//!
//! The answer depends on the asset set at the moment of asking, so it is
//! recomputed on every build and never stored across builds.

use std::collections::HashSet;

use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::{CanonicalDeviceRecord, ConversionStatus};

/// Exact string match against every asset's `primary_ip`.
pub fn resolve(ip_address: &str, assets: &[AssetRecord]) -> ConversionStatus {
    if assets.iter().any(|asset| asset.primary_ip == ip_address) {
        ConversionStatus::Converted
    } else {
        ConversionStatus::New
    }
}

pub fn status_of(device: &CanonicalDeviceRecord, assets: &[AssetRecord]) -> ConversionStatus {
    resolve(&device.ip_address, assets)
}

/// Lookup table for resolving many devices against the same asset set.
pub struct AssetIpIndex<'a> {
    primary_ips: HashSet<&'a str>,
}

impl<'a> AssetIpIndex<'a> {
    pub fn new(assets: &'a [AssetRecord]) -> Self {
        Self {
            primary_ips: assets.iter().map(|asset| asset.primary_ip.as_str()).collect(),
        }
    }

    pub fn resolve(&self, ip_address: &str) -> ConversionStatus {
        if self.primary_ips.contains(ip_address) {
            ConversionStatus::Converted
        } else {
            ConversionStatus::New
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn asset(primary_ip: &str) -> AssetRecord {
        AssetRecord {
            id: format!("asset-{primary_ip}"),
            name: primary_ip.to_string(),
            primary_ip: primary_ip.to_string(),
            ip_addresses: vec![primary_ip.to_string()],
            mac_address: None,
            hostname: None,
            os_name: None,
            manufacturer: None,
            model: None,
            device_type: None,
            description: None,
            is_managed: true,
            is_active: true,
            labels: Vec::new(),
            location: None,
            department: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn matches_primary_ip_only() {
        let mut other = asset("10.0.0.9");
        other.ip_addresses.push("10.0.0.5".into());
        let assets = vec![other];

        assert_eq!(resolve("10.0.0.5", &assets), ConversionStatus::New);
        assert_eq!(resolve("10.0.0.9", &assets), ConversionStatus::Converted);
    }

    #[test]
    fn no_address_canonicalization() {
        let assets = vec![asset("010.000.000.005")];
        assert_eq!(resolve("10.0.0.5", &assets), ConversionStatus::New);
    }

    #[test]
    fn index_agrees_with_linear_scan() {
        let assets = vec![asset("10.0.0.1"), asset("10.0.0.2")];
        let index = AssetIpIndex::new(&assets);
        for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.3", "Unknown"] {
            assert_eq!(index.resolve(ip), resolve(ip, &assets));
        }
    }
}
