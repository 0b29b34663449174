//! # Ports
//!
//! Contracts between the pipeline and the systems around it.
//!
//! ## Rules
//! 1. Everything in here is a `trait`.
//! 2. Implementations live in `assetr_core::adapters` or in the embedding application.
//! 3. Inventory models are used freely in signatures.

pub mod asset_inventory;
pub mod conversion_sink;
pub mod discovery_source;
pub mod scan_status;
pub mod vendor_repository;
