//! # Adapters
//!
//! Concrete implementations of the ports in `assetr_common::ports`.
//!
//! * **[`json_file`]**: A JSON inventory document on disk (discoveries + assets)
//!   and a JSON scan status file.
//! * **[`memory_sink`]**: An in-process asset store, used by the CLI when
//!   converting against a file and by tests.

pub mod json_file;
pub mod memory_sink;
