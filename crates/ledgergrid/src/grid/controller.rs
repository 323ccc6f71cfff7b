//! View state controller.
//!
//! Owns pagination, sorting, filtering and selection state for one grid and
//! reconciles it with caller-controlled props. Reconciliation follows effect
//! dependency semantics: a prop is acted on only when its value differs from
//! the last value seen, so re-rendering with identical props is a no-op.
//!
//! # Controlled vs. uncontrolled
//!
//! | Value        | Controlled when            | User changes                          |
//! |--------------|----------------------------|---------------------------------------|
//! | page index   | `page_index` prop is set   | update internal index, emit           |
//! | selection    | `selected_row_keys` is set | emit only; the caller owns the value  |
//!
//! A controlled selection is never written by the controller. After a user
//! selection change the prop is re-applied on the next render whether or not
//! the caller updated it, so the view cannot drift from the prop.

use ledgergrid_core::logging::targets;
use ledgergrid_core::{PropWatch, Signal};

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::model::{CellValue, ColumnKey, Row, RowStore};

use super::filter::{FilterCondition, FilterState};
use super::pager::Pager;
use super::projection::Projection;
use super::selection::{KeySelection, SelectAllMode, SelectionMode, SelectionSync};
use super::sort::{SortDirection, SortOrder, SortState, sort_positions};
use super::widget::{GridWidget, WidgetInstanceId};

/// Change notifications raised by a grid.
pub struct GridSignals<R> {
    /// The user changed the selection. Carries the selected rows' data.
    pub selection_changed: Signal<Vec<R>>,
    /// The user changed the page size. Carries the new size.
    pub page_changed: Signal<usize>,
    /// The page index changed through user navigation or a reset.
    pub page_index_changed: Signal<usize>,
    /// The sort changed.
    pub sort_changed: Signal<Option<SortOrder>>,
}

impl<R: 'static> Default for GridSignals<R> {
    fn default() -> Self {
        Self {
            selection_changed: Signal::new(),
            page_changed: Signal::new(),
            page_index_changed: Signal::new(),
            sort_changed: Signal::new(),
        }
    }
}

impl<R> std::fmt::Debug for GridSignals<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridSignals")
            .field("selection_changed", &self.selection_changed)
            .field("page_changed", &self.page_changed)
            .field("page_index_changed", &self.page_index_changed)
            .field("sort_changed", &self.sort_changed)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppliedSelection {
    instance: WidgetInstanceId,
    generation: u64,
}

/// Pagination, sorting, filtering and selection state of one grid.
pub struct ViewStateController<R: Row> {
    pager: Pager,
    sort: SortState,
    filter: FilterState,
    selection_mode: SelectionMode,
    select_all_mode: SelectAllMode,
    selection_sync: SelectionSync,

    page_index_prop: PropWatch<Option<usize>>,
    selection_prop: PropWatch<Option<Vec<R::Key>>>,
    internal_selection: KeySelection<R::Key>,
    selection_dirty: bool,
    applied_selection: Option<AppliedSelection>,
    warned_inert: bool,

    signals: GridSignals<R>,
}

impl<R: Row> ViewStateController<R> {
    /// Creates a controller on the first page with nothing sorted, filtered
    /// or selected.
    pub fn new(config: &GridConfig) -> Self {
        Self {
            pager: Pager::new(
                config.pager,
                config.page_size,
                config.allowed_page_sizes.clone(),
                config.pager_size_selector,
            ),
            sort: SortState::new(config.is_sorting_disabled),
            filter: FilterState::new(config.filtering),
            selection_mode: SelectionMode::from_select_flag(config.select),
            select_all_mode: config.select_all_mode,
            selection_sync: config.selection_sync,
            page_index_prop: PropWatch::new(),
            selection_prop: PropWatch::new(),
            internal_selection: KeySelection::new(),
            selection_dirty: false,
            applied_selection: None,
            warned_inert: false,
            signals: GridSignals::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the grid's signals.
    pub fn signals(&self) -> &GridSignals<R> {
        &self.signals
    }

    /// Returns the pager.
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Returns the sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Returns the filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Returns the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Returns the scope of "select all".
    pub fn select_all_mode(&self) -> SelectAllMode {
        self.select_all_mode
    }

    /// Returns `true` if the last render passed a selection prop.
    pub fn is_selection_controlled(&self) -> bool {
        matches!(self.selection_prop.last(), Some(Some(_)))
    }

    /// The selection the grid currently stands for: the controlled prop if
    /// there is one, else the internal selection.
    pub fn selection(&self) -> KeySelection<R::Key> {
        match self.selection_prop.last() {
            Some(Some(keys)) => keys.iter().cloned().collect(),
            _ => self.internal_selection.clone(),
        }
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Mirrors a controlled page index into internal state.
    ///
    /// Acts only when the prop differs from the last one seen. Returns `true`
    /// if the internal index moved.
    pub fn reconcile_page_index(&mut self, prop: Option<usize>) -> bool {
        if !self.page_index_prop.observe(&prop) {
            return false;
        }
        let Some(index) = prop else {
            return false;
        };
        let moved = self.pager.set_page_index(index);
        tracing::debug!(target: targets::VIEW_STATE, index, moved, "mirrored controlled page index");
        moved
    }

    /// Pushes the selection to `widget` when anything it depends on changed.
    ///
    /// The selection is re-applied when the prop changed, the widget was
    /// remounted, the row store was rebuilt, or the user changed the
    /// selection since the last apply. Only keys of loaded rows are applied.
    /// Returns `true` if the widget was called.
    pub fn reconcile_selection(
        &mut self,
        prop: Option<&[R::Key]>,
        store: &RowStore<R>,
        generation: u64,
        widget: &mut dyn GridWidget<R::Key>,
    ) -> bool {
        self.warn_if_inert();

        let prop_changed = self.selection_prop.observe(&prop.map(<[R::Key]>::to_vec));
        let current = AppliedSelection {
            instance: widget.instance_id(),
            generation,
        };
        let stale = self.applied_selection != Some(current);
        if !(prop_changed || stale || self.selection_dirty) {
            return false;
        }

        let mut keys = self.selection().intersect(|key| store.contains(key));
        if self.selection_sync == SelectionSync::Preserve {
            let mut merged: KeySelection<R::Key> = widget
                .selected_keys()
                .into_iter()
                .filter(|key| store.contains(key))
                .collect();
            merged.extend(keys);
            keys = merged.to_vec();
        }

        widget.apply_selection(&keys);
        self.applied_selection = Some(current);
        self.selection_dirty = false;

        tracing::debug!(
            target: targets::VIEW_STATE,
            applied = keys.len(),
            prop_changed,
            stale,
            "applied selection to widget"
        );
        true
    }

    fn warn_if_inert(&mut self) {
        if self.warned_inert
            || self.selection_mode == SelectionMode::NoSelection
            || self.signals.selection_changed.is_connected()
        {
            return;
        }
        self.warned_inert = true;
        tracing::warn!(
            target: targets::VIEW_STATE,
            "selection is enabled but nothing is connected to selection_changed; user selections will not be surfaced"
        );
    }

    // =========================================================================
    // Row arrangement
    // =========================================================================

    /// Source positions of the rows that pass every filter, in sort order.
    ///
    /// Filters and sorts on columns that are no longer projected (or no
    /// longer shown) are skipped.
    pub fn arrange_rows(&self, store: &RowStore<R>, projection: &Projection<R>) -> Vec<usize> {
        let filters: Vec<(usize, &FilterCondition)> = self
            .filter
            .filters()
            .iter()
            .filter_map(|f| match projection.slot_of(&f.column) {
                Some(slot) if projection.columns()[slot].visible => Some((slot, &f.condition)),
                _ => {
                    tracing::debug!(target: targets::VIEW_STATE, column = %f.column, "skipping filter on unavailable column");
                    None
                }
            })
            .collect();

        let rows = store.rows();
        let mut positions: Vec<usize> = (0..rows.len())
            .filter(|&position| {
                let row = &rows[position];
                filters.iter().all(|(slot, condition)| {
                    condition.matches(
                        &projection.cell_value(*slot, row),
                        &projection.cell_text(*slot, row),
                    )
                })
            })
            .collect();

        if let Some(order) = self.sort.order() {
            match projection.slot_of(&order.column) {
                Some(slot) => {
                    let mut keyed: Vec<(usize, CellValue)> = positions
                        .iter()
                        .map(|&p| (p, projection.cell_value(slot, &rows[p])))
                        .collect();
                    sort_positions(&mut keyed, order.direction);
                    positions = keyed.into_iter().map(|(p, _)| p).collect();
                }
                None => {
                    tracing::debug!(target: targets::VIEW_STATE, column = %order.column, "skipping sort on unavailable column");
                }
            }
        }
        positions
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves to page `index` of `total` rows.
    pub fn go_to_page(&mut self, index: usize, total: usize) -> Result<bool> {
        let moved = self.pager.go_to(index, total)?;
        if moved {
            self.signals.page_index_changed.emit(index);
        }
        Ok(moved)
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self, total: usize) -> bool {
        let next = self.pager.page_index() + 1;
        if next >= self.pager.page_count(total) {
            return false;
        }
        self.go_to_page(next, total).unwrap_or(false)
    }

    /// Moves to the previous page, if there is one.
    pub fn previous_page(&mut self) -> bool {
        let index = self.pager.page_index();
        if index == 0 {
            return false;
        }
        // A page past the end may be left backwards even if it does not exist.
        let moved = self.pager.set_page_index(index - 1);
        if moved {
            self.signals.page_index_changed.emit(index - 1);
        }
        moved
    }

    /// Applies a user page-size change.
    ///
    /// Always returns to the first page and emits `page_changed(size)`;
    /// `page_index_changed(0)` follows if the index moved.
    pub fn change_page_size(&mut self, size: usize) -> Result<()> {
        let moved = self.pager.set_page_size(size)?;
        tracing::debug!(target: targets::VIEW_STATE, size, "page size changed, back to first page");
        self.signals.page_changed.emit(size);
        if moved {
            self.signals.page_index_changed.emit(0);
        }
        Ok(())
    }

    /// Moves to the last page if the current one starts beyond `total` rows.
    pub fn clamp_page_index(&mut self, total: usize) -> bool {
        let moved = self.pager.clamp(total);
        if moved {
            let index = self.pager.page_index();
            tracing::debug!(target: targets::VIEW_STATE, index, total, "clamped page index");
            self.signals.page_index_changed.emit(index);
        }
        moved
    }

    fn reset_page_index(&mut self) {
        if self.pager.set_page_index(0) {
            self.signals.page_index_changed.emit(0);
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts by `column` in `direction`.
    pub fn sort_by(
        &mut self,
        column: &ColumnKey,
        direction: SortDirection,
        projection: &Projection<R>,
    ) -> Result<bool> {
        Self::check_sortable(column, projection)?;
        Ok(self.set_sort(Some(SortOrder {
            column: column.clone(),
            direction,
        })))
    }

    /// Advances the header-click cycle on `column`: ascending, descending, none.
    pub fn toggle_sort(&mut self, column: &ColumnKey, projection: &Projection<R>) -> Result<bool> {
        Self::check_sortable(column, projection)?;
        let next = self.sort.next_for(column);
        Ok(self.set_sort(next))
    }

    /// Removes the sort.
    pub fn clear_sort(&mut self) -> bool {
        self.set_sort(None)
    }

    fn check_sortable(column: &ColumnKey, projection: &Projection<R>) -> Result<()> {
        let projected = projection
            .column(column)
            .ok_or_else(|| GridError::UnknownColumn {
                key: column.to_string(),
            })?;
        if !projected.sortable {
            return Err(GridError::ColumnNotSortable {
                key: column.to_string(),
            });
        }
        Ok(())
    }

    fn set_sort(&mut self, order: Option<SortOrder>) -> bool {
        if self.sort.is_disabled() {
            tracing::debug!(target: targets::VIEW_STATE, "sorting is disabled, ignoring sort request");
            return false;
        }
        if !self.sort.set(order.clone()) {
            return false;
        }
        self.signals.sort_changed.emit(order);
        true
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Sets the filter on `column` and returns to the first page.
    pub fn set_filter(
        &mut self,
        column: ColumnKey,
        condition: FilterCondition,
        projection: &Projection<R>,
    ) -> Result<bool> {
        if !self.filter.is_enabled() {
            tracing::warn!(target: targets::VIEW_STATE, column = %column, "filtering is disabled, ignoring filter");
            return Ok(false);
        }
        let projected = projection
            .column(&column)
            .ok_or_else(|| GridError::UnknownColumn {
                key: column.to_string(),
            })?;
        if !projected.visible {
            return Err(GridError::ColumnHidden {
                key: column.to_string(),
            });
        }
        if !self.filter.set(column, condition) {
            return Ok(false);
        }
        self.reset_page_index();
        Ok(true)
    }

    /// Removes the filter on `column`.
    pub fn clear_filter(&mut self, column: &ColumnKey) -> bool {
        if !self.filter.remove(column) {
            return false;
        }
        self.reset_page_index();
        true
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) -> bool {
        if !self.filter.clear() {
            return false;
        }
        self.reset_page_index();
        true
    }

    // =========================================================================
    // User selection
    // =========================================================================

    /// Toggles one row.
    pub fn toggle_row(&mut self, key: &R::Key, store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() || !store.contains(key) {
            return false;
        }
        let mut next = self.selection();
        next.toggle(key.clone());
        self.commit_selection(next, store)
    }

    /// Adds rows to the selection. Keys of rows that are not loaded are ignored.
    pub fn select_rows(&mut self, keys: &[R::Key], store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() {
            return false;
        }
        let mut next = self.selection();
        next.extend(keys.iter().filter(|key| store.contains(key)).cloned());
        self.commit_selection(next, store)
    }

    /// Removes rows from the selection.
    pub fn deselect_rows(&mut self, keys: &[R::Key], store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() {
            return false;
        }
        let mut next = self.selection();
        for key in keys {
            next.remove(key);
        }
        self.commit_selection(next, store)
    }

    /// Adds `candidates`, the rows "select all" covers, to the selection.
    pub fn select_all(&mut self, candidates: Vec<R::Key>, store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() {
            return false;
        }
        let mut next = self.selection();
        next.extend(candidates);
        self.commit_selection(next, store)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self, store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() {
            return false;
        }
        self.commit_selection(KeySelection::new(), store)
    }

    /// Replaces the selection with `keys`, as a view reporting its checkbox
    /// state would.
    pub fn set_user_selection(&mut self, keys: Vec<R::Key>, store: &RowStore<R>) -> bool {
        if !self.accepts_user_selection() {
            return false;
        }
        let next = keys.into_iter().filter(|key| store.contains(key)).collect();
        self.commit_selection(next, store)
    }

    fn accepts_user_selection(&self) -> bool {
        if self.selection_mode == SelectionMode::NoSelection {
            tracing::debug!(target: targets::VIEW_STATE, "selection is disabled, ignoring user selection");
            return false;
        }
        true
    }

    fn commit_selection(&mut self, next: KeySelection<R::Key>, store: &RowStore<R>) -> bool {
        if next.same_keys(&self.selection()) {
            return false;
        }
        if !self.is_selection_controlled() {
            self.internal_selection = next.clone();
        }
        self.selection_dirty = true;

        let rows: Vec<R> = next
            .keys()
            .iter()
            .filter_map(|key| store.row(key).cloned())
            .collect();
        tracing::debug!(
            target: targets::VIEW_STATE,
            selected = rows.len(),
            controlled = self.is_selection_controlled(),
            "user changed selection"
        );
        self.signals.selection_changed.emit(rows);
        true
    }
}

impl<R: Row> std::fmt::Debug for ViewStateController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateController")
            .field("pager", &self.pager)
            .field("sort", &self.sort)
            .field("filter", &self.filter)
            .field("selection_mode", &self.selection_mode)
            .field("selection", &self.selection())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::error::ValidationPolicy;
    use crate::grid::HeadlessGrid;
    use crate::model::{Column, ColumnKeyStrategy, LookupCatalog};

    #[derive(Clone, Debug, PartialEq)]
    struct Repayment {
        id: u32,
        amount: i64,
    }

    impl Row for Repayment {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn field(&self, name: &str) -> CellValue {
            match name {
                "id" => CellValue::from(self.id),
                "amount" => CellValue::from(self.amount),
                _ => CellValue::None,
            }
        }
    }

    fn store(n: u32) -> RowStore<Repayment> {
        let rows = (1..=n)
            .map(|id| Repayment {
                id,
                amount: i64::from(id % 3) * 100,
            })
            .collect();
        RowStore::build(Arc::new(rows), ValidationPolicy::Strict).unwrap()
    }

    fn projection() -> Projection<Repayment> {
        let columns = vec![
            Column::field("id", "Id"),
            Column::field("amount", "Amount"),
            Column::field("id", "Internal").hidden(),
        ];
        Projection::build(
            &columns,
            &LookupCatalog::new(),
            ColumnKeyStrategy::Index,
            ValidationPolicy::Strict,
            &[],
        )
        .unwrap()
    }

    fn controller(config: GridConfig) -> ViewStateController<Repayment> {
        ViewStateController::new(&config)
    }

    #[test]
    fn test_page_index_prop_mirrored_once() {
        let mut vsc = controller(GridConfig::new().with_pager(true));
        assert!(vsc.reconcile_page_index(Some(3)));
        assert_eq!(vsc.pager().page_index(), 3);

        // User navigates away; an unchanged prop does not pull it back.
        vsc.go_to_page(1, 500).unwrap();
        assert!(!vsc.reconcile_page_index(Some(3)));
        assert_eq!(vsc.pager().page_index(), 1);

        // A new prop value is mirrored.
        assert!(vsc.reconcile_page_index(Some(0)));
        assert_eq!(vsc.pager().page_index(), 0);
    }

    #[test]
    fn test_page_size_change_signals() {
        let mut vsc = controller(GridConfig::new().with_pager(true));
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let indices = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&sizes);
        vsc.signals().page_changed.connect(move |size| s.lock().push(*size));
        let i = Arc::clone(&indices);
        vsc.signals().page_index_changed.connect(move |index| i.lock().push(*index));

        vsc.go_to_page(2, 200).unwrap();
        vsc.change_page_size(20).unwrap();
        assert_eq!(vsc.pager().page_index(), 0);
        assert_eq!(*sizes.lock(), vec![20]);
        assert_eq!(*indices.lock(), vec![2, 0]);

        assert!(vsc.change_page_size(33).is_err());
        assert_eq!(*sizes.lock(), vec![20]);
    }

    #[test]
    fn test_next_and_previous_page() {
        let mut vsc = controller(GridConfig::new().with_pager(true).with_page_size(10));
        assert!(vsc.next_page(25));
        assert!(vsc.next_page(25));
        assert!(!vsc.next_page(25));
        assert_eq!(vsc.pager().page_index(), 2);
        assert!(vsc.previous_page());
        assert_eq!(vsc.pager().page_index(), 1);
        assert!(vsc.previous_page());
        assert!(!vsc.previous_page());
    }

    #[test]
    fn test_selection_idempotent_for_same_prop() {
        let store = store(5);
        let mut widget = HeadlessGrid::new();
        let mut vsc = controller(GridConfig::new().with_select(true));
        vsc.signals().selection_changed.connect(|_| {});

        assert!(vsc.reconcile_selection(Some(&[1, 2]), &store, 1, &mut widget));
        assert!(!vsc.reconcile_selection(Some(&[1, 2]), &store, 1, &mut widget));
        assert_eq!(widget.calls().selection, 1);
        assert_eq!(widget.selected_keys(), vec![1, 2]);
    }

    #[test]
    fn test_selection_reapplied_on_remount_and_rebuild() {
        let store = store(5);
        let mut widget = HeadlessGrid::new();
        let mut vsc = controller(GridConfig::new().with_select(true));

        vsc.reconcile_selection(Some(&[4]), &store, 1, &mut widget);
        widget.remount();
        assert!(vsc.reconcile_selection(Some(&[4]), &store, 1, &mut widget));
        assert_eq!(widget.selected_keys(), vec![4]);

        assert!(vsc.reconcile_selection(Some(&[4]), &store, 2, &mut widget));
        assert_eq!(widget.calls().selection, 3);
    }

    #[test]
    fn test_unloaded_keys_not_shown_but_kept() {
        let store = store(3);
        let mut widget = HeadlessGrid::new();
        let mut vsc = controller(GridConfig::new().with_select(true));

        vsc.reconcile_selection(Some(&[2, 99]), &store, 1, &mut widget);
        assert_eq!(widget.selected_keys(), vec![2]);
        assert!(vsc.selection().contains(&99));
    }

    #[test]
    fn test_controlled_selection_emits_without_writing() {
        let store = store(5);
        let mut widget = HeadlessGrid::new();
        let mut vsc = controller(GridConfig::new().with_select(true));
        let emitted = Arc::new(Mutex::new(Vec::new()));
        let e = Arc::clone(&emitted);
        vsc.signals().selection_changed.connect(move |rows: &Vec<Repayment>| {
            e.lock().push(rows.iter().map(|r| r.id).collect::<Vec<_>>());
        });

        vsc.reconcile_selection(Some(&[1]), &store, 1, &mut widget);
        assert!(vsc.toggle_row(&3, &store));
        assert_eq!(*emitted.lock(), vec![vec![1, 3]]);
        // The prop still rules.
        assert_eq!(vsc.selection().to_vec(), vec![1]);

        // Caller ignored the event: the next render re-applies the prop.
        widget.set_visual_selection(vec![1, 3]);
        assert!(vsc.reconcile_selection(Some(&[1]), &store, 1, &mut widget));
        assert_eq!(widget.selected_keys(), vec![1]);
    }

    #[test]
    fn test_uncontrolled_selection_is_internal() {
        let store = store(5);
        let mut widget = HeadlessGrid::new();
        let mut vsc = controller(GridConfig::new().with_select(true));

        vsc.reconcile_selection(None, &store, 1, &mut widget);
        assert!(vsc.toggle_row(&2, &store));
        assert!(vsc.select_rows(&[4, 5, 42], &store));
        assert_eq!(vsc.selection().to_vec(), vec![2, 4, 5]);
        assert!(vsc.deselect_rows(&[4], &store));

        assert!(vsc.reconcile_selection(None, &store, 1, &mut widget));
        assert_eq!(widget.selected_keys(), vec![2, 5]);
    }

    #[test]
    fn test_selection_disabled_ignores_user() {
        let store = store(5);
        let mut vsc = controller(GridConfig::new());
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        vsc.signals().selection_changed.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!vsc.toggle_row(&1, &store));
        assert!(!vsc.select_all(vec![1, 2], &store));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_emit_when_selection_unchanged() {
        let store = store(5);
        let mut vsc = controller(GridConfig::new().with_select(true));
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        vsc.signals().selection_changed.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!vsc.clear_selection(&store));
        assert!(vsc.set_user_selection(vec![1, 2], &store));
        assert!(!vsc.set_user_selection(vec![2, 1], &store));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_preserve_sync_merges_with_widget() {
        let store = store(5);
        let mut widget = HeadlessGrid::new();
        let mut vsc =
            controller(GridConfig::new().with_select(true).with_selection_sync(SelectionSync::Preserve));

        widget.set_visual_selection(vec![5]);
        vsc.reconcile_selection(Some(&[1]), &store, 1, &mut widget);
        assert_eq!(widget.selected_keys(), vec![5, 1]);
    }

    #[test]
    fn test_filter_and_sort_arrangement() {
        let store = store(6);
        let projection = projection();
        let mut vsc = controller(GridConfig::new().with_filtering(true).with_pager(true));

        // amounts: 1->100, 2->200, 3->0, 4->100, 5->200, 6->0
        vsc.sort_by(&ColumnKey::Index(1), SortDirection::Descending, &projection)
            .unwrap();
        assert_eq!(vsc.arrange_rows(&store, &projection), vec![1, 4, 0, 3, 2, 5]);

        vsc.go_to_page(0, 6).unwrap();
        vsc.set_filter(ColumnKey::Index(1), FilterCondition::equals(100i64), &projection)
            .unwrap();
        assert_eq!(vsc.arrange_rows(&store, &projection), vec![0, 3]);
    }

    #[test]
    fn test_filter_resets_page() {
        let projection = projection();
        let mut vsc = controller(GridConfig::new().with_filtering(true).with_pager(true));
        vsc.go_to_page(3, 500).unwrap();
        vsc.set_filter(ColumnKey::Index(0), FilterCondition::contains("1"), &projection)
            .unwrap();
        assert_eq!(vsc.pager().page_index(), 0);
    }

    #[test]
    fn test_filter_preconditions() {
        let projection = projection();
        let mut vsc = controller(GridConfig::new().with_filtering(true));
        assert!(matches!(
            vsc.set_filter(ColumnKey::Index(2), FilterCondition::contains("x"), &projection),
            Err(GridError::ColumnHidden { .. })
        ));
        assert!(matches!(
            vsc.set_filter(ColumnKey::Index(7), FilterCondition::contains("x"), &projection),
            Err(GridError::UnknownColumn { .. })
        ));

        let mut off = controller(GridConfig::new());
        assert!(!off
            .set_filter(ColumnKey::Index(0), FilterCondition::contains("x"), &projection)
            .unwrap());
    }

    #[test]
    fn test_sorting_disabled() {
        let projection = projection();
        let mut vsc = controller(GridConfig::new().with_sorting_disabled(true));
        assert!(!vsc.toggle_sort(&ColumnKey::Index(0), &projection).unwrap());
        assert!(vsc.sort_state().order().is_none());
    }

    #[test]
    fn test_sort_signal() {
        let projection = projection();
        let mut vsc = controller(GridConfig::new());
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        vsc.signals().sort_changed.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        vsc.toggle_sort(&ColumnKey::Index(0), &projection).unwrap();
        vsc.toggle_sort(&ColumnKey::Index(0), &projection).unwrap();
        vsc.toggle_sort(&ColumnKey::Index(0), &projection).unwrap();
        assert!(!vsc.clear_sort());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_clamp_is_opt_in() {
        let mut vsc = controller(GridConfig::new().with_pager(true).with_page_size(10));
        vsc.reconcile_page_index(Some(5));
        assert!(vsc.pager().is_past_end(12));
        assert!(vsc.clamp_page_index(12));
        assert_eq!(vsc.pager().page_index(), 1);
    }
}
