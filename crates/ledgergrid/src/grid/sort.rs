//! Single-column sorting.

use std::cmp::Ordering;

use crate::model::{CellValue, ColumnKey};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOrder {
    /// Sorted column.
    pub column: ColumnKey,
    /// Direction.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates an ascending sort on `column`.
    pub fn ascending(column: ColumnKey) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending sort on `column`.
    pub fn descending(column: ColumnKey) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Sort state of a grid.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    disabled: bool,
    order: Option<SortOrder>,
}

impl SortState {
    /// Creates an unsorted state. A disabled state never holds an order.
    pub fn new(disabled: bool) -> Self {
        Self {
            disabled,
            order: None,
        }
    }

    /// Returns `true` if sorting is turned off for the grid.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the active order.
    pub fn order(&self) -> Option<&SortOrder> {
        self.order.as_ref()
    }

    /// Replaces the order. Returns `true` if it changed.
    ///
    /// Ignored while sorting is disabled.
    pub fn set(&mut self, order: Option<SortOrder>) -> bool {
        if self.disabled || self.order == order {
            return false;
        }
        self.order = order;
        true
    }

    /// The order a header click on `column` moves to: none, ascending,
    /// descending, none.
    pub fn next_for(&self, column: &ColumnKey) -> Option<SortOrder> {
        match &self.order {
            Some(order) if &order.column == column => match order.direction {
                SortDirection::Ascending => Some(SortOrder::descending(column.clone())),
                SortDirection::Descending => None,
            },
            _ => Some(SortOrder::ascending(column.clone())),
        }
    }
}

/// Stable-sorts row positions by precomputed sort values.
///
/// Ties keep their incoming order in both directions.
pub fn sort_positions(keyed: &mut [(usize, CellValue)], direction: SortDirection) {
    keyed.sort_by(|(_, a), (_, b)| direction.apply(a.cmp_default(b)));
}
