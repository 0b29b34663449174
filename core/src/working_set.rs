//! The two collections the operator works with: discovered devices and assets.
//!
//! Conversion mutates both at once through [`WorkingSet::commit_conversion`],
//! which takes `&mut self`, so no reader can see a device in both sets or in
//! neither.

use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::device::CanonicalDeviceRecord;
use assetr_common::inventory::envelope::DiscoveryEnvelope;

use crate::pipeline;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    discovered: Vec<DiscoveryEnvelope>,
    assets: Vec<AssetRecord>,
}

impl WorkingSet {
    pub fn new(discovered: Vec<DiscoveryEnvelope>, assets: Vec<AssetRecord>) -> Self {
        Self { discovered, assets }
    }

    pub fn discovered(&self) -> &[DiscoveryEnvelope] {
        &self.discovered
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.discovered.iter().any(|envelope| envelope.id == device_id)
    }

    /// Builds fresh records for every discovered device against the current assets.
    pub fn device_records(&self) -> Vec<CanonicalDeviceRecord> {
        pipeline::build_records(&self.discovered, &self.assets)
    }

    pub fn device_record(&self, device_id: &str) -> Option<CanonicalDeviceRecord> {
        self.discovered
            .iter()
            .find(|envelope| envelope.id == device_id)
            .map(|envelope| pipeline::build_record(envelope, &self.assets))
    }

    /// Moves a device out of the discovered set and its asset into the asset set.
    ///
    /// Returns `false` and changes nothing if the device is not present.
    pub fn commit_conversion(&mut self, device_id: &str, asset: AssetRecord) -> bool {
        let Some(pos) = self.discovered.iter().position(|envelope| envelope.id == device_id) else {
            return false;
        };
        self.discovered.remove(pos);
        self.assets.push(asset);
        true
    }

    pub fn into_parts(self) -> (Vec<DiscoveryEnvelope>, Vec<AssetRecord>) {
        (self.discovered, self.assets)
    }
}
