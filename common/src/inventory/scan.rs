use serde::{Deserialize, Serialize};

/// Snapshot of the scanner's "active scan" resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStatus {
    #[serde(default)]
    pub active: bool,
    pub scan_id: Option<String>,
    /// Percentage in `[0, 100]` when the scanner reports one.
    pub progress: Option<f64>,
    pub hosts_found: Option<u64>,
}

impl ScanStatus {
    pub fn idle() -> Self {
        Self::default()
    }
}
