//! Key-based row selection.
//!
//! Selection is tracked as a set of row keys, never row positions or
//! references, so it survives replacement of the row array as long as the
//! keys persist.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Selection behavior mode for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No rows can be selected (default).
    #[default]
    NoSelection,
    /// Any number of rows can be selected via checkboxes.
    MultiSelection,
}

impl SelectionMode {
    /// Mode implied by the grid's `select` flag.
    pub fn from_select_flag(select: bool) -> Self {
        if select {
            Self::MultiSelection
        } else {
            Self::NoSelection
        }
    }
}

/// Scope of "select all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectAllMode {
    /// Every row of the (filtered) data source, across all pages.
    #[default]
    AllPages,
    /// Only the rows on the visible page.
    Page,
}

/// How a selection is pushed to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSync {
    /// The widget shows exactly the applied keys.
    #[default]
    Replace,
    /// The applied keys are merged into what the widget already shows.
    Preserve,
}

/// An ordered set of selected row keys.
///
/// Keeps insertion order for stable `selection_changed` payloads and a hash
/// set for O(1) membership checks.
#[derive(Debug, Clone)]
pub struct KeySelection<K> {
    ordered: Vec<K>,
    members: HashSet<K>,
}

impl<K> Default for KeySelection<K> {
    fn default() -> Self {
        Self {
            ordered: Vec::new(),
            members: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> KeySelection<K> {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from keys, dropping repeats.
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut selection = Self::new();
        for key in keys {
            selection.insert(key);
        }
        selection
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Checks if a key is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    /// Returns the number of selected keys.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns the keys in selection order.
    pub fn keys(&self) -> &[K] {
        &self.ordered
    }

    /// Returns the keys as a vector.
    pub fn to_vec(&self) -> Vec<K> {
        self.ordered.clone()
    }

    /// Returns `true` if both selections hold the same keys, in any order.
    pub fn same_keys(&self, other: &Self) -> bool {
        self.members == other.members
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds a key. Returns `true` if it was not already selected.
    pub fn insert(&mut self, key: K) -> bool {
        if self.members.insert(key.clone()) {
            self.ordered.push(key);
            true
        } else {
            false
        }
    }

    /// Removes a key. Returns `true` if it was selected.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.members.remove(key) {
            self.ordered.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    /// Toggles a key. Returns the new membership state.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.remove(&key) {
            false
        } else {
            self.insert(key);
            true
        }
    }

    /// Adds every key. Returns `true` if anything changed.
    pub fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) -> bool {
        let mut changed = false;
        for key in keys {
            changed |= self.insert(key);
        }
        changed
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_selection = !self.ordered.is_empty();
        self.ordered.clear();
        self.members.clear();
        had_selection
    }

    /// Keeps only the keys for which `keep` returns `true`.
    pub fn retain<F: FnMut(&K) -> bool>(&mut self, mut keep: F) {
        self.ordered.retain(|key| keep(key));
        self.members = self.ordered.iter().cloned().collect();
    }

    /// Returns the keys also accepted by `filter`, in selection order.
    pub fn intersect<F: Fn(&K) -> bool>(&self, filter: F) -> Vec<K> {
        self.ordered.iter().filter(|k| filter(k)).cloned().collect()
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for KeySelection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}
