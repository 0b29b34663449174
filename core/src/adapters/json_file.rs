use std::path::{Path, PathBuf};

use assetr_common::error::SourceError;
use assetr_common::inventory::asset::AssetRecord;
use assetr_common::inventory::envelope::DiscoveryEnvelope;
use assetr_common::inventory::scan::ScanStatus;
use assetr_common::ports::asset_inventory::AssetInventory;
use assetr_common::ports::discovery_source::DiscoverySource;
use assetr_common::ports::scan_status::ScanStatusSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::working_set::WorkingSet;

/// On-disk shape of an inventory export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub discoveries: Vec<DiscoveryEnvelope>,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

impl InventoryDocument {
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        read_json(path).await
    }

    pub async fn save(&self, path: &Path) -> Result<(), SourceError> {
        let body = serde_json::to_vec_pretty(self).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tokio::fs::write(path, body)
            .await
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "wrote inventory document");
        Ok(())
    }
}

impl From<WorkingSet> for InventoryDocument {
    fn from(set: WorkingSet) -> Self {
        let (discoveries, assets) = set.into_parts();
        Self { discoveries, assets }
    }
}

impl From<InventoryDocument> for WorkingSet {
    fn from(doc: InventoryDocument) -> Self {
        WorkingSet::new(doc.discoveries, doc.assets)
    }
}

/// Serves both halves of an [`InventoryDocument`]. The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonInventoryFile {
    path: PathBuf,
}

impl JsonInventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DiscoverySource for JsonInventoryFile {
    async fn fetch_discoveries(&self) -> anyhow::Result<Vec<DiscoveryEnvelope>> {
        Ok(InventoryDocument::load(&self.path).await?.discoveries)
    }
}

#[async_trait]
impl AssetInventory for JsonInventoryFile {
    async fn fetch_assets(&self) -> anyhow::Result<Vec<AssetRecord>> {
        Ok(InventoryDocument::load(&self.path).await?.assets)
    }
}

/// A file the scanner rewrites with its current [`ScanStatus`].
///
/// A missing file means no scan is running. Any other I/O failure is an error.
#[derive(Debug, Clone)]
pub struct JsonScanStatusFile {
    path: PathBuf,
}

impl JsonScanStatusFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScanStatusSource for JsonScanStatusFile {
    async fn scan_status(&self) -> anyhow::Result<ScanStatus> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        if !exists {
            return Ok(ScanStatus::idle());
        }
        Ok(read_json(&self.path).await?)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
