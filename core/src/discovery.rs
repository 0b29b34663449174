//! # Discovery Service
//!
//! Implements the "Load Working Set" use case.
//!
//! This service pulls the discovered devices and the managed assets from their
//! ports and hands them to the operator as a single [`WorkingSet`], optionally
//! filling in missing manufacturers from a vendor repository.

use assetr_common::inventory::envelope::DiscoveryEnvelope;
use assetr_common::ports::asset_inventory::AssetInventory;
use assetr_common::ports::discovery_source::DiscoverySource;
use assetr_common::ports::vendor_repository::VendorRepository;
use tracing::{debug, info};

use crate::pipeline::normalizer;
use crate::working_set::WorkingSet;

/// Application Service for loading the working set.
///
/// Orchestrates the load by:
/// 1. fetching discoveries through the [`DiscoverySource`] port.
/// 2. fetching assets through the [`AssetInventory`] port.
/// 3. enriching discoveries with vendor names, when a repository is attached.
pub struct DiscoveryService {
    source: Box<dyn DiscoverySource>,
    inventory: Box<dyn AssetInventory>,
    vendor_repo: Option<Box<dyn VendorRepository>>,
}

impl DiscoveryService {
    pub fn new(source: Box<dyn DiscoverySource>, inventory: Box<dyn AssetInventory>) -> Self {
        Self {
            source,
            inventory,
            vendor_repo: None,
        }
    }

    pub fn with_vendor_repo(mut self, vendor_repo: Box<dyn VendorRepository>) -> Self {
        self.vendor_repo = Some(vendor_repo);
        self
    }

    /// Fetches both collections and combines them.
    ///
    /// Either port failing fails the whole load; a partial working set would
    /// show converted devices as new.
    pub async fn load(&self) -> anyhow::Result<WorkingSet> {
        let (mut discoveries, assets) =
            tokio::try_join!(self.source.fetch_discoveries(), self.inventory.fetch_assets())?;

        let enriched = self.enrich_vendors(&mut discoveries);

        info!(
            discovered = discoveries.len(),
            assets = assets.len(),
            enriched,
            "loaded working set"
        );
        Ok(WorkingSet::new(discoveries, assets))
    }

    /// Sets `manufacturer` from the MAC's OUI where nothing else provides one.
    fn enrich_vendors(&self, discoveries: &mut [DiscoveryEnvelope]) -> usize {
        let Some(repo) = self.vendor_repo.as_deref() else {
            return 0;
        };

        let mut enriched = 0;
        for envelope in discoveries.iter_mut() {
            if normalizer::manufacturer(envelope).is_some() {
                continue;
            }
            let Some(mac) = normalizer::mac_address(envelope) else {
                continue;
            };
            if let Some(vendor) = repo.get_vendor(&mac) {
                debug!(device_id = envelope.id.as_str(), mac = mac.as_str(), vendor = vendor.as_str(), "resolved vendor");
                envelope.manufacturer = Some(vendor);
                enriched += 1;
            }
        }
        enriched
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
