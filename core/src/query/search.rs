//! The search surface: filter, sort and field completion.

use tracing::debug;

use crate::query::evaluator;
use crate::query::fields::{Entity, FieldDescriptor, FieldRegistry};
use crate::query::parser::{self, QueryExpression};
use crate::query::sorter::{self, SortSpec};

/// Records matching `text`, in their original order.
///
/// Never fails: malformed field queries are searched as plain text.
pub fn filter<'a, T: Entity>(records: &'a [T], text: &str) -> Vec<&'a T> {
    let expression = parser::parse(text);
    filter_with(records, &expression, T::registry())
}

pub fn filter_with<'a, T>(
    records: &'a [T],
    expression: &QueryExpression,
    registry: &FieldRegistry<T>,
) -> Vec<&'a T> {
    let matched: Vec<&T> = records
        .iter()
        .filter(|record| evaluator::evaluate_with(expression, *record, registry))
        .collect();
    debug!(query = ?expression, total = records.len(), matched = matched.len(), "filtered records");
    matched
}

/// Filters by `text`, then sorts the matches if a sort is given.
pub fn search<'a, T: Entity>(records: &'a [T], text: &str, sort: Option<&SortSpec>) -> Vec<&'a T> {
    let mut matched = filter(records, text);
    if let Some(spec) = sort {
        sorter::sort::<T, _>(&mut matched, spec);
    }
    matched
}

/// Fields whose key or label match the last whitespace-delimited token of `input`.
///
/// Independent of evaluation: a completed field query (`ip=...`) or trailing
/// whitespace yields no suggestions.
pub fn suggest<T: Entity>(input: &str) -> Vec<&'static FieldDescriptor<T>> {
    suggest_with(input, T::registry())
}

pub fn suggest_with<'r, T>(input: &str, registry: &'r FieldRegistry<T>) -> Vec<&'r FieldDescriptor<T>> {
    let Some(token) = last_token(input) else {
        return Vec::new();
    };
    if token.contains(['=', '<', '>', '!']) {
        return Vec::new();
    }

    let token = token.to_lowercase();
    registry
        .iter()
        .filter(|field| field.key.starts_with(&token) || field.label.to_lowercase().contains(&token))
        .collect()
}

/// Replaces the last token of `input` with `key=`, ready for a value.
pub fn apply_suggestion(input: &str, key: &str) -> String {
    let head = match last_token(input) {
        Some(token) => &input[..input.len() - token.len()],
        None => input,
    };
    format!("{head}{key}=")
}

fn last_token(input: &str) -> Option<&str> {
    if input.ends_with(char::is_whitespace) {
        return None;
    }
    input.split_whitespace().last()
}
