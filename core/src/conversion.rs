//! # Conversion
//!
//! Promotes discovered devices into managed assets through a [`ConversionSink`].
//!
//! A device can be converted once: after a successful conversion it is no
//! longer in the discovered set, so converting the same id again fails with
//! [`ConversionError::NotFound`] instead of creating a second asset.

use assetr_common::config::Config;
use assetr_common::error::ConversionError;
use assetr_common::inventory::asset::{AssetDraft, AssetRecord};
use assetr_common::inventory::device::CanonicalDeviceRecord;
use assetr_common::ports::conversion_sink::ConversionSink;
use serde::Serialize;
use tracing::{info, warn};

use crate::selection::Selection;
use crate::working_set::WorkingSet;

/// Operator-supplied values that replace the derived ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetOverrides {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_managed: Option<bool>,
    pub labels: Option<Vec<String>>,
    pub location: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchItemError {
    pub item_id: String,
    pub message: String,
}

/// Per-item accounting of a bulk conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<BatchItemError>,
    pub created: Vec<AssetRecord>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failure_count == 0
    }

    fn record_success(&mut self, asset: AssetRecord) {
        self.success_count += 1;
        self.created.push(asset);
    }

    fn record_failure(&mut self, err: &ConversionError) {
        self.failure_count += 1;
        self.errors.push(BatchItemError {
            item_id: err.device_id().to_string(),
            message: err.to_string(),
        });
    }
}

pub struct ConversionCoordinator {
    sink: Box<dyn ConversionSink>,
    mark_managed: bool,
    default_labels: Vec<String>,
}

impl ConversionCoordinator {
    pub fn new(sink: Box<dyn ConversionSink>) -> Self {
        Self::with_config(sink, &Config::default())
    }

    pub fn with_config(sink: Box<dyn ConversionSink>, cfg: &Config) -> Self {
        Self {
            sink,
            mark_managed: cfg.mark_managed,
            default_labels: cfg.default_labels.clone(),
        }
    }

    /// The create request sent to the sink for `record`.
    pub fn draft_for(&self, record: &CanonicalDeviceRecord, overrides: Option<&AssetOverrides>) -> AssetDraft {
        let overrides = overrides.cloned().unwrap_or_default();

        let name = overrides
            .name
            .or_else(|| record.hostname.clone())
            .unwrap_or_else(|| record.ip_address.clone());
        let description = overrides.description.unwrap_or_else(|| {
            format!(
                "{} discovered with {}% confidence",
                record.device_type,
                record.confidence_percent()
            )
        });

        AssetDraft {
            name,
            description: Some(description),
            primary_ip: record.ip_address.clone(),
            mac_address: record.mac_address.clone(),
            hostname: record.hostname.clone(),
            os_name: record.os_name.clone(),
            manufacturer: record.manufacturer.clone(),
            model: record.model.clone(),
            device_type: Some(record.device_type.to_string()),
            is_managed: overrides.is_managed.unwrap_or(self.mark_managed),
            is_active: true,
            ip_addresses: vec![record.ip_address.clone()],
            labels: overrides.labels.unwrap_or_else(|| self.default_labels.clone()),
            location: overrides.location,
            department: overrides.department,
        }
    }

    /// Converts one device and commits the result into `working_set`.
    ///
    /// The working set is only touched when the sink accepts the draft.
    pub async fn convert(
        &self,
        working_set: &mut WorkingSet,
        device_id: &str,
        overrides: Option<&AssetOverrides>,
    ) -> Result<AssetRecord, ConversionError> {
        let record = working_set
            .device_record(device_id)
            .ok_or_else(|| ConversionError::NotFound {
                device_id: device_id.to_string(),
            })?;

        if !record.has_usable_ip() {
            return Err(ConversionError::InvalidIdentity {
                device_id: device_id.to_string(),
            });
        }

        let draft = self.draft_for(&record, overrides);
        let asset = self.sink.create_asset(draft).await.map_err(|e| {
            warn!(device_id, "asset sink rejected conversion: {e:#}");
            ConversionError::Rejected {
                device_id: device_id.to_string(),
                reason: format!("{e:#}"),
            }
        })?;

        working_set.commit_conversion(device_id, asset.clone());
        info!(
            device_id,
            asset_id = asset.id.as_str(),
            primary_ip = asset.primary_ip.as_str(),
            "converted device to asset"
        );
        Ok(asset)
    }

    /// Converts every selected device in turn.
    ///
    /// Each item succeeds or fails on its own; a failure never stops the rest.
    /// Converted ids are removed from `selection`, failed ones stay selected.
    /// The name override is ignored so every asset keeps its own name.
    pub async fn convert_batch(
        &self,
        working_set: &mut WorkingSet,
        selection: &mut Selection,
        overrides: Option<&AssetOverrides>,
    ) -> BatchReport {
        let shared = overrides.map(|o| AssetOverrides {
            name: None,
            ..o.clone()
        });

        let mut report = BatchReport::default();
        for device_id in selection.ids().to_vec() {
            match self.convert(working_set, &device_id, shared.as_ref()).await {
                Ok(asset) => {
                    selection.deselect(&device_id);
                    report.record_success(asset);
                }
                Err(err) => report.record_failure(&err),
            }
        }

        info!(
            succeeded = report.success_count,
            failed = report.failure_count,
            "batch conversion finished"
        );
        report
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
