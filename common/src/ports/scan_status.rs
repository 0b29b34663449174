use async_trait::async_trait;

use crate::inventory::scan::ScanStatus;

/// The scanner's "is a scan running right now" resource.
#[async_trait]
pub trait ScanStatusSource: Send + Sync {
    async fn scan_status(&self) -> anyhow::Result<ScanStatus>;
}
