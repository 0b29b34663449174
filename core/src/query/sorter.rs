//! Single-key, type-aware, stable sorting.

use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::debug;

use crate::query::fields::{Entity, FieldDescriptor, FieldRegistry};
use crate::query::value::FieldType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Same key, opposite direction.
    pub fn toggled(&self) -> Self {
        Self {
            key: self.key.clone(),
            direction: self.direction.toggled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(String),
    Number(f64),
    Millis(i64),
}

impl SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Millis(a), SortKey::Millis(b)) => a.cmp(b),
            // keys for one field always share a variant
            _ => Ordering::Equal,
        }
    }
}

pub fn sort<T: Entity, R: Borrow<T>>(records: &mut [R], spec: &SortSpec) {
    sort_with(records, spec, T::registry());
}

/// Stable: records with equal keys keep their relative order in both directions.
///
/// An unknown key leaves `records` untouched.
pub fn sort_with<T, R: Borrow<T>>(records: &mut [R], spec: &SortSpec, registry: &FieldRegistry<T>) {
    let Some(field) = registry.get(&spec.key) else {
        debug!(key = spec.key.as_str(), "unknown sort key, keeping order");
        return;
    };

    let mut keyed: Vec<(SortKey, usize)> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| (sort_key(field, Borrow::<T>::borrow(record)), idx))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    });

    let order: Vec<usize> = keyed.into_iter().map(|(_, idx)| idx).collect();
    apply_permutation(records, order);
}

fn sort_key<T>(field: &FieldDescriptor<T>, record: &T) -> SortKey {
    let value = field.resolve(record);
    match field.field_type {
        FieldType::Date => SortKey::Millis(
            value
                .and_then(|v| v.as_timestamp())
                .map(|ts| ts.timestamp_millis())
                .unwrap_or(0),
        ),
        FieldType::Number => SortKey::Number(value.and_then(|v| v.as_number()).unwrap_or(0.0)),
        FieldType::String => SortKey::Text(value.map(|v| v.text().into_owned()).unwrap_or_default()),
    }
}

/// Reorders `records` so that position `i` holds what was at `order[i]`.
fn apply_permutation<R>(records: &mut [R], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            records.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetr_common::inventory::asset::AssetRecord;
    use chrono::{TimeZone, Utc};

    fn asset(id: &str, name: &str, created_day: Option<u32>, ips: usize) -> AssetRecord {
        AssetRecord {
            id: id.into(),
            name: name.into(),
            primary_ip: format!("10.0.0.{id}"),
            ip_addresses: (0..ips).map(|n| format!("10.0.{n}.1")).collect(),
            mac_address: None,
            hostname: None,
            os_name: None,
            manufacturer: None,
            model: None,
            device_type: None,
            description: None,
            is_managed: true,
            is_active: true,
            labels: Vec::new(),
            location: None,
            department: None,
            created_at: created_day
                .map(|day| Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
                .unwrap_or_default(),
        }
    }

    fn ids(records: &[AssetRecord]) -> Vec<&str> {
        records.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn sorts_text_lexicographically() {
        let mut assets = vec![asset("1", "b", None, 1), asset("2", "a", None, 1), asset("3", "c", None, 1)];
        sort::<AssetRecord, _>(&mut assets, &SortSpec::ascending("name"));
        assert_eq!(ids(&assets), vec!["2", "1", "3"]);
    }

    #[test]
    fn sorts_numbers_numerically() {
        let mut assets = vec![asset("1", "x", None, 10), asset("2", "x", None, 2), asset("3", "x", None, 0)];
        sort::<AssetRecord, _>(&mut assets, &SortSpec::ascending("ip_count"));
        assert_eq!(ids(&assets), vec!["3", "2", "1"]);
    }

    #[test]
    fn date_toggle_reverses_distinct_and_keeps_ties() {
        let original = vec![
            asset("1", "x", Some(3), 1),
            asset("2", "x", Some(1), 1),
            asset("3", "x", Some(2), 1),
            asset("4", "x", Some(2), 1),
            asset("5", "x", Some(5), 1),
        ];

        let mut records = original.clone();
        let spec = SortSpec::descending("created");
        sort::<AssetRecord, _>(&mut records, &spec);
        assert_eq!(ids(&records), vec!["5", "1", "3", "4", "2"]);

        sort::<AssetRecord, _>(&mut records, &spec.toggled());
        assert_eq!(ids(&records), vec!["2", "3", "4", "1", "5"]);
    }

    #[test]
    fn toggling_twice_is_identity() {
        let mut records = vec![
            asset("1", "b", None, 1),
            asset("2", "a", None, 1),
            asset("3", "b", None, 1),
        ];
        let spec = SortSpec::ascending("name");
        sort::<AssetRecord, _>(&mut records, &spec);
        let once = ids(&records).into_iter().map(String::from).collect::<Vec<_>>();

        sort::<AssetRecord, _>(&mut records, &spec.toggled());
        sort::<AssetRecord, _>(&mut records, &spec.toggled().toggled());
        assert_eq!(ids(&records), once);
    }

    #[test]
    fn missing_values_sort_as_defaults() {
        let mut records = vec![asset("1", "x", Some(2), 1), asset("2", "x", None, 1)];
        sort::<AssetRecord, _>(&mut records, &SortSpec::ascending("created"));
        assert_eq!(ids(&records), vec!["2", "1"]);

        let mut records = vec![asset("1", "x", None, 1), asset("2", "x", None, 1)];
        records[0].location = Some("B".into());
        sort::<AssetRecord, _>(&mut records, &SortSpec::ascending("location"));
        assert_eq!(ids(&records), vec!["2", "1"]);
    }

    #[test]
    fn unknown_key_keeps_order() {
        let mut records = vec![asset("2", "b", None, 1), asset("1", "a", None, 1)];
        sort::<AssetRecord, _>(&mut records, &SortSpec::descending("nope"));
        assert_eq!(ids(&records), vec!["2", "1"]);
    }

    #[test]
    fn sorts_borrowed_records() {
        let assets = vec![asset("1", "b", None, 1), asset("2", "a", None, 1)];
        let mut view: Vec<&AssetRecord> = assets.iter().collect();
        sort::<AssetRecord, _>(&mut view, &SortSpec::ascending("name"));
        assert_eq!(view[0].id, "2");
    }

    #[test]
    fn permutation_helper() {
        let mut letters = vec!['a', 'b', 'c', 'd'];
        apply_permutation(&mut letters, vec![2, 0, 3, 1]);
        assert_eq!(letters, vec!['c', 'a', 'd', 'b']);
    }
}
