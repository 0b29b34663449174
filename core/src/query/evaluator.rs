//! Decides whether a record matches a [`QueryExpression`].
//!
//! The evaluator never knows field semantics itself: everything it needs comes
//! from the [`FieldRegistry`] it is given. Matching is total. An unknown field,
//! a missing value or a value that cannot be coerced simply does not match.

use std::cmp::Ordering;

use tracing::trace;

use crate::query::fields::{Entity, FieldDescriptor, FieldRegistry};
use crate::query::parser::{Operator, QueryExpression};
use crate::query::value::{self, FieldType, FieldValue};

pub fn evaluate<T: Entity>(expression: &QueryExpression, record: &T) -> bool {
    evaluate_with(expression, record, T::registry())
}

pub fn evaluate_with<T>(expression: &QueryExpression, record: &T, registry: &FieldRegistry<T>) -> bool {
    match expression {
        QueryExpression::Simple(text) => matches_text(text, record, registry),
        QueryExpression::FieldQuery {
            field,
            operator,
            value,
        } => {
            let Some(descriptor) = registry.get(field) else {
                trace!(field = field.as_str(), "unknown field, no match");
                return false;
            };
            matches_field(descriptor, *operator, value, record)
        }
    }
}

/// Case-insensitive substring test over every searchable field; blank text matches all.
pub fn matches_text<T>(text: &str, record: &T, registry: &FieldRegistry<T>) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    registry
        .searchable()
        .filter_map(|field| field.resolve(record))
        .any(|value| value.text().to_lowercase().contains(&needle))
}

fn matches_field<T>(descriptor: &FieldDescriptor<T>, operator: Operator, expected: &str, record: &T) -> bool {
    let expected = match operator {
        Operator::Eq | Operator::NotEq => descriptor.canonical_option(expected.trim()),
        _ => expected,
    };
    match descriptor.resolve(record) {
        Some(actual) => compare(descriptor.field_type, operator, &actual, expected),
        None => false,
    }
}

/// Applies `operator` between a present value and the query text.
pub fn compare(field_type: FieldType, operator: Operator, actual: &FieldValue, expected: &str) -> bool {
    match operator {
        Operator::Eq => text_eq(actual, expected),
        Operator::NotEq => !text_eq(actual, expected),
        Operator::Contains => actual
            .text()
            .to_lowercase()
            .contains(&expected.to_lowercase()),
        Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => {
            let Some(ordering) = order(field_type, actual, expected) else {
                trace!(%field_type, expected, "operands not comparable, no match");
                return false;
            };
            match operator {
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Lt => ordering == Ordering::Less,
                Operator::Ge => ordering != Ordering::Less,
                Operator::Le => ordering != Ordering::Greater,
                _ => unreachable!("only ordering operators reach here"),
            }
        }
    }
}

fn text_eq(actual: &FieldValue, expected: &str) -> bool {
    actual.text().to_lowercase() == expected.trim().to_lowercase()
}

fn order(field_type: FieldType, actual: &FieldValue, expected: &str) -> Option<Ordering> {
    match field_type {
        FieldType::Date => {
            let left = actual.as_timestamp()?;
            let right = value::parse_timestamp(expected)?;
            Some(left.cmp(&right))
        }
        FieldType::Number | FieldType::String => {
            let left = actual.as_number()?;
            let right = value::parse_number(expected)?;
            left.partial_cmp(&right)
        }
    }
}
