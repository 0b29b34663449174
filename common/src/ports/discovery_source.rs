use async_trait::async_trait;

use crate::inventory::envelope::DiscoveryEnvelope;

/// Yields the current discovered-but-not-converted working set.
#[async_trait]
pub trait DiscoverySource: Send + Sync {
    async fn fetch_discoveries(&self) -> anyhow::Result<Vec<DiscoveryEnvelope>>;
}
