use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the active scan status is polled while a scan is running.
    pub poll_interval: Duration,
    /// 0 prints everything, 1 drops decorations, 2 prints one line per item.
    pub quiet: u8,
    /// Fills in a manufacturer the discovery did not report from the MAC address OUI.
    ///
    /// Off by default since it changes classification and confidence.
    pub vendor_lookup: bool,
    /// Whether newly converted assets are flagged as managed.
    pub mark_managed: bool,
    /// Labels attached to every converted asset unless the overrides carry their own.
    pub default_labels: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            quiet: 0,
            vendor_lookup: false,
            mark_managed: true,
            default_labels: Vec::new(),
        }
    }
}
