use async_trait::async_trait;

use crate::inventory::asset::AssetRecord;

/// Read path of the managed asset inventory.
#[async_trait]
pub trait AssetInventory: Send + Sync {
    async fn fetch_assets(&self) -> anyhow::Result<Vec<AssetRecord>>;
}
