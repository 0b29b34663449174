use std::sync::Arc;

use anyhow::bail;
use assetr_common::inventory::asset::{AssetDraft, AssetRecord};
use assetr_common::ports::asset_inventory::AssetInventory;
use assetr_common::ports::conversion_sink::ConversionSink;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Asset store held in memory. Clones share the same storage.
///
/// Enforces the two rules a real inventory backend would: a name is required
/// and a primary IP belongs to at most one asset.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSink {
    assets: Arc<Mutex<Vec<AssetRecord>>>,
}

impl MemoryAssetSink {
    pub fn with_assets(assets: Vec<AssetRecord>) -> Self {
        Self {
            assets: Arc::new(Mutex::new(assets)),
        }
    }

    pub async fn snapshot(&self) -> Vec<AssetRecord> {
        self.assets.lock().await.clone()
    }
}

#[async_trait]
impl ConversionSink for MemoryAssetSink {
    async fn create_asset(&self, draft: AssetDraft) -> anyhow::Result<AssetRecord> {
        if draft.name.trim().is_empty() {
            bail!("asset name is required");
        }

        let mut assets = self.assets.lock().await;
        if assets.iter().any(|a| a.primary_ip == draft.primary_ip) {
            bail!("an asset with primary IP {} already exists", draft.primary_ip);
        }

        let record = draft.into_record(Uuid::new_v4().to_string(), Utc::now());
        assets.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AssetInventory for MemoryAssetSink {
    async fn fetch_assets(&self) -> anyhow::Result<Vec<AssetRecord>> {
        Ok(self.snapshot().await)
    }
}
