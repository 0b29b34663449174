use async_trait::async_trait;

use crate::inventory::asset::{AssetDraft, AssetRecord};

/// Write path of the managed asset inventory.
#[async_trait]
pub trait ConversionSink: Send + Sync {
    /// Creates an asset from `draft`.
    ///
    /// # Returns
    /// * `Ok(AssetRecord)` - The stored asset, with its id and creation time.
    /// * `Err(_)` - The sink refused the draft (e.g. the `primary_ip` is taken).
    ///   The error's display text is reported to the operator as-is.
    async fn create_asset(&self, draft: AssetDraft) -> anyhow::Result<AssetRecord>;
}
