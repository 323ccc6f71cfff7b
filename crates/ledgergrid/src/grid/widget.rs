//! The widget seam.
//!
//! Everything the grid pushes to a concrete view goes through
//! [`GridWidget`]. A view implementation only has to mirror what it is told;
//! deciding *when* to tell it is the grid's job.

use std::sync::atomic::{AtomicU64, Ordering};

use super::filter::ColumnFilter;
use super::frame::PageInfo;
use super::projection::ProjectedColumn;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one mounted widget instance.
///
/// A remounted widget gets a fresh id, which makes the grid re-apply all of
/// its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetInstanceId(u64);

impl WidgetInstanceId {
    /// Allocates a new, never-before-used id.
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A concrete grid view.
pub trait GridWidget<K> {
    /// Identity of the current instance. Must change on remount.
    fn instance_id(&self) -> WidgetInstanceId;

    /// Replaces the column definitions.
    fn apply_columns(&mut self, columns: &[ProjectedColumn]);

    /// Moves to a page.
    fn apply_page(&mut self, page: &PageInfo);

    /// Sets the visually selected rows to exactly `keys`.
    fn apply_selection(&mut self, keys: &[K]);

    /// Replaces the active filters.
    fn apply_filter(&mut self, filters: &[ColumnFilter]);

    /// Returns the visually selected rows.
    fn selected_keys(&self) -> Vec<K>;
}

/// Number of calls a [`HeadlessGrid`] received, per method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetCalls {
    /// `apply_columns` calls.
    pub columns: usize,
    /// `apply_page` calls.
    pub page: usize,
    /// `apply_selection` calls.
    pub selection: usize,
    /// `apply_filter` calls.
    pub filter: usize,
}

/// A widget with no visual output that records what it was told.
///
/// Useful for tests and for consumers that only need the rendered
/// [`GridFrame`](super::GridFrame).
#[derive(Debug)]
pub struct HeadlessGrid<K> {
    instance_id: WidgetInstanceId,
    columns: Vec<ProjectedColumn>,
    page: Option<PageInfo>,
    selection: Vec<K>,
    filters: Vec<ColumnFilter>,
    calls: WidgetCalls,
}

impl<K: Clone> Default for HeadlessGrid<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> HeadlessGrid<K> {
    /// Creates a freshly mounted widget.
    pub fn new() -> Self {
        Self {
            instance_id: WidgetInstanceId::next(),
            columns: Vec::new(),
            page: None,
            selection: Vec::new(),
            filters: Vec::new(),
            calls: WidgetCalls::default(),
        }
    }

    /// Simulates a remount: new instance id, all visual state lost.
    pub fn remount(&mut self) {
        self.instance_id = WidgetInstanceId::next();
        self.columns.clear();
        self.page = None;
        self.selection.clear();
        self.filters.clear();
    }

    /// Simulates the user clicking rows in the view without going through the grid.
    pub fn set_visual_selection(&mut self, keys: Vec<K>) {
        self.selection = keys;
    }

    /// Returns the applied columns.
    pub fn columns(&self) -> &[ProjectedColumn] {
        &self.columns
    }

    /// Returns the applied page.
    pub fn page(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    /// Returns the applied filters.
    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    /// Returns the call counters.
    pub fn calls(&self) -> WidgetCalls {
        self.calls
    }

    /// Resets the call counters.
    pub fn reset_calls(&mut self) {
        self.calls = WidgetCalls::default();
    }
}

impl<K: Clone> GridWidget<K> for HeadlessGrid<K> {
    fn instance_id(&self) -> WidgetInstanceId {
        self.instance_id
    }

    fn apply_columns(&mut self, columns: &[ProjectedColumn]) {
        self.calls.columns += 1;
        self.columns = columns.to_vec();
    }

    fn apply_page(&mut self, page: &PageInfo) {
        self.calls.page += 1;
        self.page = Some(page.clone());
    }

    fn apply_selection(&mut self, keys: &[K]) {
        self.calls.selection += 1;
        self.selection = keys.to_vec();
    }

    fn apply_filter(&mut self, filters: &[ColumnFilter]) {
        self.calls.filter += 1;
        self.filters = filters.to_vec();
    }

    fn selected_keys(&self) -> Vec<K> {
        self.selection.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_ids_are_unique() {
        let a = WidgetInstanceId::next();
        let b = WidgetInstanceId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_remount_changes_identity_and_clears_state() {
        let mut widget: HeadlessGrid<u32> = HeadlessGrid::new();
        let before = widget.instance_id();
        widget.apply_selection(&[1, 2]);
        assert_eq!(widget.calls().selection, 1);

        widget.remount();
        assert_ne!(widget.instance_id(), before);
        assert!(widget.selected_keys().is_empty());
        // Counters survive a remount.
        assert_eq!(widget.calls().selection, 1);
    }
}
