//! Operator selection of discovered devices.
//!
//! A plain value owned by whoever renders the list. Nothing in the pipeline
//! keeps selection state of its own.

use assetr_common::inventory::device::CanonicalDeviceRecord;

use crate::working_set::WorkingSet;

/// Selected device ids in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.retain(|selected| selected != id);
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.deselect(id);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    /// Adds every record currently visible, e.g. the result of a search.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a CanonicalDeviceRecord>) {
        for record in visible {
            self.select(record.id.as_str());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that are no longer part of the discovered set.
    pub fn prune(&mut self, working_set: &WorkingSet) {
        self.ids.retain(|id| working_set.contains_device(id));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for id in iter {
            selection.select(id);
        }
        selection
    }
}
