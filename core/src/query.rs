//! # Query Language
//!
//! Filtering and sorting shared by the device and asset views.
//!
//! * [`parser`]: `field<op>value` or free text, one clause.
//! * [`fields`]: per-entity registries of typed accessors.
//! * [`evaluator`]: match / no-match of an expression against one record.
//! * [`sorter`]: stable single-key ordering.
//! * [`search`]: the combined surface, plus field completion.

pub mod evaluator;
pub mod fields;
pub mod parser;
pub mod search;
pub mod sorter;
pub mod value;

pub use fields::{Entity, EntityKind, FieldDescriptor, FieldRegistry};
pub use parser::{Operator, QueryExpression, parse};
pub use search::{apply_suggestion, filter, search, suggest};
pub use sorter::{SortDirection, SortSpec};
pub use value::{FieldType, FieldValue};
