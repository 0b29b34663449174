//! # assetr-core
//!
//! The discovery record pipeline and everything built on top of it.
//!
//! * **[`pipeline`]**: Envelope to canonical device record (normalize, classify, score, status).
//! * **[`query`]**: Field registries, the query language, filtering, sorting and completion.
//! * **[`working_set`]** / **[`selection`]**: What the operator is looking at and has picked.
//! * **[`conversion`]**: Promoting devices to assets, one at a time or in bulk.
//! * **[`polling`]**: Watching an active scan until it finishes.
//! * **[`discovery`]**: Loading the working set through the ports.
//! * **[`adapters`]** / **[`vendors`]**: Port implementations.

pub mod adapters;
pub mod conversion;
pub mod discovery;
pub mod pipeline;
pub mod polling;
pub mod query;
pub mod selection;
pub mod vendors;
pub mod working_set;
