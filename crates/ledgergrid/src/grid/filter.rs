//! Per-column row filters.
//!
//! Filters are a presentation transform: they decide which rows are shown
//! and exported, and never touch row data.

use crate::model::{CellValue, ColumnKey};

/// A condition tested against one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// Case-insensitive substring match on the displayed text. Lookup
    /// columns match their labels.
    Contains(String),
    /// Exact match on the raw value.
    Equals(CellValue),
}

impl FilterCondition {
    /// Creates a substring condition.
    pub fn contains(text: impl Into<String>) -> Self {
        Self::Contains(text.into())
    }

    /// Creates an exact-match condition.
    pub fn equals(value: impl Into<CellValue>) -> Self {
        Self::Equals(value.into())
    }

    /// Tests a cell given its raw value and displayed text.
    pub fn matches(&self, value: &CellValue, text: &str) -> bool {
        match self {
            Self::Contains(needle) => {
                needle.is_empty() || text.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::Equals(expected) => value == expected,
        }
    }
}

/// A condition bound to a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    /// Filtered column.
    pub column: ColumnKey,
    /// Condition.
    pub condition: FilterCondition,
}

/// Active filters of a grid, at most one per column.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    enabled: bool,
    filters: Vec<ColumnFilter>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            filters: Vec::new(),
        }
    }

    /// Returns `true` if the filter row is shown.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the active filters in the order they were first set.
    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    /// Returns `true` if any filter is set.
    pub fn is_active(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Returns the filter on `column`.
    pub fn get(&self, column: &ColumnKey) -> Option<&FilterCondition> {
        self.filters
            .iter()
            .find(|f| &f.column == column)
            .map(|f| &f.condition)
    }

    /// Sets the filter on `column`. Returns `true` if it changed.
    pub fn set(&mut self, column: ColumnKey, condition: FilterCondition) -> bool {
        match self.filters.iter_mut().find(|f| f.column == column) {
            Some(existing) if existing.condition == condition => false,
            Some(existing) => {
                existing.condition = condition;
                true
            }
            None => {
                self.filters.push(ColumnFilter { column, condition });
                true
            }
        }
    }

    /// Removes the filter on `column`. Returns `true` if one was set.
    pub fn remove(&mut self, column: &ColumnKey) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| &f.column != column);
        self.filters.len() != before
    }

    /// Removes every filter. Returns `true` if any was set.
    pub fn clear(&mut self) -> bool {
        let had_filters = !self.filters.is_empty();
        self.filters.clear();
        had_filters
    }
}
