//! # Inventory Models
//!
//! * [`envelope::DiscoveryEnvelope`]: What the scanner hands over, raw payload included.
//! * [`device::CanonicalDeviceRecord`]: The normalized, classified and scored device.
//! * [`asset::AssetRecord`]: A device that has been promoted into the managed inventory.
//! * [`scan::ScanStatus`]: Snapshot of the currently running scan, if any.

pub mod asset;
pub mod device;
pub mod envelope;
pub mod scan;
