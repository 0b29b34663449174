//! # Discovery Record Pipeline
//!
//! Builds render-ready [`CanonicalDeviceRecord`]s out of raw discovery envelopes.
//!
//! Stages run in order for every device:
//! 1. [`normalizer`]: null-safe fallback chains over envelope and payload.
//! 2. [`classifier`]: fixed-priority device type table.
//! 3. [`confidence`]: weighted presence of identity signals.
//! 4. [`status`]: New or Converted, against the asset set passed in.
//!
//! All stages are pure. Records are cheap to rebuild and should be rebuilt
//! whenever the envelopes or the asset set change.

pub mod classifier;
pub mod confidence;
pub mod normalizer;
pub mod status;

use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::{CanonicalDeviceRecord, ConversionStatus};
use assetr_common::inventory::envelope::DiscoveryEnvelope;

use status::AssetIpIndex;

/// Runs every stage for a single envelope.
pub fn build_record(envelope: &DiscoveryEnvelope, assets: &[AssetRecord]) -> CanonicalDeviceRecord {
    let identity = normalizer::normalize(envelope);
    let status = status::resolve(&identity.ip_address, assets);
    assemble(envelope, identity, status)
}

/// Runs every stage for a whole working set, preserving input order.
pub fn build_records(envelopes: &[DiscoveryEnvelope], assets: &[AssetRecord]) -> Vec<CanonicalDeviceRecord> {
    let index = AssetIpIndex::new(assets);
    envelopes
        .iter()
        .map(|envelope| {
            let identity = normalizer::normalize(envelope);
            let status = index.resolve(&identity.ip_address);
            assemble(envelope, identity, status)
        })
        .collect()
}

fn assemble(
    envelope: &DiscoveryEnvelope,
    identity: normalizer::IdentityFields,
    status: ConversionStatus,
) -> CanonicalDeviceRecord {
    let device_type = classifier::classify(&identity);
    let confidence = confidence::score(&identity);

    CanonicalDeviceRecord {
        id: envelope.id.clone(),
        hostname: identity.hostname,
        ip_address: identity.ip_address,
        mac_address: identity.mac_address,
        os_name: identity.os_name,
        manufacturer: identity.manufacturer,
        model: identity.model,
        last_seen: identity.last_seen,
        device_type,
        confidence,
        status,
        ports: identity.ports,
        services: identity.services,
        provenance: envelope.provenance.clone(),
        raw_payload: envelope.scan_data.clone(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
