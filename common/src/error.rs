use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single device could not be promoted to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The device never resolved a usable IP address.
    #[error("device '{device_id}' has no usable IP address")]
    InvalidIdentity { device_id: String },
    /// The device is not (or no longer) part of the discovered working set.
    #[error("device '{device_id}' is not in the discovered set")]
    NotFound { device_id: String },
    /// The asset sink refused to create the asset.
    #[error("asset sink rejected device '{device_id}': {reason}")]
    Rejected { device_id: String, reason: String },
}

impl ConversionError {
    pub fn device_id(&self) -> &str {
        match self {
            Self::InvalidIdentity { device_id }
            | Self::NotFound { device_id }
            | Self::Rejected { device_id, .. } => device_id,
        }
    }
}

/// Failures of the file backed inventory and status adapters.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
