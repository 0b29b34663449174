//! # assetr-common
//!
//! Shared building blocks for the discovery record pipeline.
//!
//! * **[`inventory`]**: Discovery envelopes, canonical device records and assets.
//! * **[`ports`]**: Traits the pipeline depends on (discovery source, asset sink, ...).
//! * **[`error`]**: Failures that are allowed to surface to the caller.
//! * **[`config`]**: Runtime options shared between the CLI and the services.

pub mod config;
pub mod error;
pub mod inventory;
pub mod ports;
