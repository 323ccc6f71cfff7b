//! The controlled grid.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use ledgergrid_core::logging::targets;

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::export::{self, CsvOptions};
use crate::model::{Column, ColumnKey, ColumnKeyStrategy, DataSource, LookupCatalog, Row, RowStore};

use super::controller::{GridSignals, ViewStateController};
use super::filter::{ColumnFilter, FilterCondition};
use super::frame::{GridFrame, PageInfo, PagerView, RenderedRow};
use super::projection::Projection;
use super::selection::{KeySelection, SelectAllMode, SelectionMode};
use super::sort::{SortDirection, SortOrder};
use super::widget::{GridWidget, WidgetInstanceId};

/// Per-render input of a grid.
///
/// `rows` and `columns` are snapshots: the grid keeps the `Arc`s it is given
/// and never mutates them. Passing the same `Arc` again is how a caller says
/// "unchanged"; a new `Arc` is treated as a full replacement.
pub struct GridProps<R: Row> {
    /// The rows to show.
    pub rows: Arc<Vec<R>>,
    /// The columns to show them through.
    pub columns: Arc<Vec<Column<R>>>,
    /// Controlled page index. `None` leaves paging to the grid.
    pub page_index: Option<usize>,
    /// Controlled selection. `None` leaves selection to the grid.
    pub selected_row_keys: Option<Vec<R::Key>>,
}

impl<R: Row> GridProps<R> {
    /// Creates props with uncontrolled page index and selection.
    pub fn new(rows: Arc<Vec<R>>, columns: Arc<Vec<Column<R>>>) -> Self {
        Self {
            rows,
            columns,
            page_index: None,
            selected_row_keys: None,
        }
    }

    /// Controls the page index.
    pub fn with_page_index(mut self, page_index: usize) -> Self {
        self.page_index = Some(page_index);
        self
    }

    /// Controls the selection.
    pub fn with_selected_row_keys(mut self, keys: Vec<R::Key>) -> Self {
        self.selected_row_keys = Some(keys);
        self
    }
}

impl<R: Row> Clone for GridProps<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            columns: Arc::clone(&self.columns),
            page_index: self.page_index,
            selected_row_keys: self.selected_row_keys.clone(),
        }
    }
}

/// What the current widget instance was last told.
#[derive(Debug, Default)]
struct AppliedState {
    instance: Option<WidgetInstanceId>,
    columns: bool,
    page: Option<PageInfo>,
    filters: Option<Vec<ColumnFilter>>,
}

/// A controlled data grid.
///
/// Each call to [`render`](Self::render) reconciles the caller's props with
/// the grid's view state, pushes whatever changed through the widget, and
/// returns the frame to draw. User interaction goes through the grid's
/// methods and is reported on its [`signals`](Self::signals).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ledgergrid::prelude::*;
///
/// #[derive(Clone)]
/// struct Payor { id: u32, name: &'static str }
///
/// impl Row for Payor {
///     type Key = u32;
///     fn key(&self) -> u32 { self.id }
///     fn field(&self, name: &str) -> CellValue {
///         match name {
///             "name" => self.name.into(),
///             _ => CellValue::None,
///         }
///     }
/// }
///
/// let mut grid = Grid::new(GridConfig::new().with_select(true)).unwrap();
/// grid.signals().selection_changed.connect(|rows: &Vec<Payor>| {
///     println!("{} payors selected", rows.len());
/// });
///
/// let rows = Arc::new(vec![Payor { id: 1, name: "Acme" }, Payor { id: 2, name: "Green Leaf" }]);
/// let columns = Arc::new(vec![Column::field("name", "Payor")]);
/// let props = GridProps::new(rows, columns).with_selected_row_keys(vec![2]);
///
/// let mut widget = HeadlessGrid::new();
/// let frame = grid.render(&props, &mut widget).unwrap();
///
/// assert_eq!(frame.rows.len(), 2);
/// assert_eq!(frame.selection, vec![2]);
/// ```
pub struct Grid<R: Row> {
    config: GridConfig,
    lookups: LookupCatalog,
    key_strategy: ColumnKeyStrategy,
    source: DataSource<R>,
    controller: ViewStateController<R>,
    projection: Projection<R>,
    projected_from: Option<Arc<Vec<Column<R>>>>,
    projection_stale: bool,
    column_order: Vec<ColumnKey>,
    applied: AppliedState,
}

impl<R: Row> Grid<R> {
    /// Creates a grid with no lookup tables.
    pub fn new(config: GridConfig) -> Result<Self> {
        Self::with_lookups(config, LookupCatalog::new())
    }

    /// Creates a grid whose columns may name tables in `lookups`.
    pub fn with_lookups(config: GridConfig, lookups: LookupCatalog) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            key_strategy: ColumnKeyStrategy::for_reordering(config.allow_column_reordering),
            source: DataSource::new(config.validation),
            controller: ViewStateController::new(&config),
            projection: Projection::default(),
            projected_from: None,
            projection_stale: true,
            column_order: Vec::new(),
            applied: AppliedState::default(),
            config,
            lookups,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns the grid's signals.
    pub fn signals(&self) -> &GridSignals<R> {
        self.controller.signals()
    }

    /// Returns the view state controller.
    pub fn controller(&self) -> &ViewStateController<R> {
        &self.controller
    }

    /// Returns the current row store.
    pub fn store(&self) -> &Arc<RowStore<R>> {
        self.source.store()
    }

    /// Returns the lookup tables.
    pub fn lookups(&self) -> &LookupCatalog {
        &self.lookups
    }

    /// Replaces the lookup tables. Takes effect on the next render.
    pub fn set_lookups(&mut self, lookups: LookupCatalog) {
        self.lookups = lookups;
        self.projection_stale = true;
    }

    /// Returns the current column projection.
    pub fn projection(&self) -> &Projection<R> {
        &self.projection
    }

    /// Returns the current page index.
    pub fn page_index(&self) -> usize {
        self.controller.pager().page_index()
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> usize {
        self.controller.pager().page_size()
    }

    /// Returns the active sort.
    pub fn sort_order(&self) -> Option<&SortOrder> {
        self.controller.sort_state().order()
    }

    /// Returns the active filters.
    pub fn filters(&self) -> &[ColumnFilter] {
        self.controller.filter_state().filters()
    }

    /// Returns the keys the grid considers selected (controlled or not),
    /// including keys of rows that are not loaded.
    pub fn selected_keys(&self) -> Vec<R::Key> {
        self.controller.selection().to_vec()
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Runs one render pass.
    ///
    /// Syncs the row store and column projection, reconciles controlled
    /// props, arranges rows, pushes changed state to `widget`, and returns
    /// the frame. On a precondition error under the strict policy nothing is
    /// pushed to the widget and the previous projection is kept.
    #[tracing::instrument(
        skip_all,
        target = "ledgergrid::grid",
        level = "debug",
        fields(rows = props.rows.len(), columns = props.columns.len())
    )]
    pub fn render(
        &mut self,
        props: &GridProps<R>,
        widget: &mut dyn GridWidget<R::Key>,
    ) -> Result<GridFrame<R>> {
        self.source.sync(&props.rows)?;
        let columns_changed = self.sync_columns(&props.columns)?;
        self.controller.reconcile_page_index(props.page_index);

        let store = Arc::clone(self.source.store());
        let positions = self.controller.arrange_rows(&store, &self.projection);
        let page = self.page_info(positions.len(), store.len());
        if page.past_end {
            tracing::debug!(
                target: targets::GRID,
                index = page.index,
                total = page.total_rows,
                "page index is past the last row, showing an empty page"
            );
        }

        let instance = widget.instance_id();
        if self.applied.instance != Some(instance) {
            self.applied = AppliedState {
                instance: Some(instance),
                ..AppliedState::default()
            };
        }
        if columns_changed || !self.applied.columns {
            widget.apply_columns(self.projection.columns());
            self.applied.columns = true;
        }
        if self.applied.page.as_ref() != Some(&page) {
            widget.apply_page(&page);
            self.applied.page = Some(page.clone());
        }
        let filters = self.controller.filter_state().filters().to_vec();
        if self.applied.filters.as_ref() != Some(&filters) {
            widget.apply_filter(&filters);
            self.applied.filters = Some(filters.clone());
        }
        self.controller.reconcile_selection(
            props.selected_row_keys.as_deref(),
            &store,
            self.source.generation(),
            widget,
        );

        let selection: Vec<R::Key> = widget
            .selected_keys()
            .into_iter()
            .filter(|key| store.contains(key))
            .collect();
        let selected: HashSet<&R::Key> = selection.iter().collect();

        let range = self.controller.pager().page_range(positions.len());
        let rows = positions[range]
            .iter()
            .filter_map(|&position| store.row_at(position))
            .map(|row| {
                let key = row.key();
                RenderedRow {
                    selected: selected.contains(&key),
                    cells: (0..self.projection.len())
                        .map(|slot| self.projection.render_cell(slot, row))
                        .collect(),
                    key,
                }
            })
            .collect();

        let pager = self.controller.pager();
        Ok(GridFrame {
            columns: self.projection.columns().to_vec(),
            rows,
            pager: pager.is_enabled().then(|| PagerView {
                allowed_page_sizes: pager.allowed_page_sizes().to_vec(),
                show_size_selector: pager.show_size_selector(),
            }),
            page,
            filter_row: self.controller.filter_state().is_enabled(),
            filters,
            sorting_enabled: !self.controller.sort_state().is_disabled(),
            sort: self.controller.sort_state().order().cloned(),
            selection,
            select: self.controller.selection_mode() == SelectionMode::MultiSelection,
            select_all_mode: self.controller.select_all_mode(),
            excel_export: self.config.is_excel_export,
        })
    }

    /// Reprojects when the column `Arc` or anything the projection depends
    /// on changed. Returns `true` if the projected columns differ.
    fn sync_columns(&mut self, columns: &Arc<Vec<Column<R>>>) -> Result<bool> {
        let same_columns = self
            .projected_from
            .as_ref()
            .is_some_and(|previous| Arc::ptr_eq(previous, columns));
        if same_columns && !self.projection_stale {
            return Ok(false);
        }

        let projection = Projection::build(
            columns,
            &self.lookups,
            self.key_strategy,
            self.config.validation,
            &self.column_order,
        )?;
        let changed = self.projected_from.is_none()
            || self.projection_stale
            || projection.columns() != self.projection.columns();
        self.projection = projection;
        self.projected_from = Some(Arc::clone(columns));
        self.projection_stale = false;
        Ok(changed)
    }

    fn page_info(&self, total_rows: usize, source_rows: usize) -> PageInfo {
        let pager = self.controller.pager();
        PageInfo {
            index: pager.page_index(),
            size: if pager.is_enabled() {
                pager.page_size()
            } else {
                total_rows
            },
            count: pager.page_count(total_rows),
            total_rows,
            source_rows,
            past_end: pager.is_past_end(total_rows),
        }
    }

    fn arranged_positions(&self) -> Vec<usize> {
        self.controller
            .arrange_rows(self.source.store(), &self.projection)
    }

    fn arranged_keys(&self, positions: &[usize]) -> Vec<R::Key> {
        let store = self.source.store();
        positions
            .iter()
            .filter_map(|&position| store.row_at(position))
            .map(Row::key)
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles the selection of one row.
    pub fn toggle_row_selection(&mut self, key: &R::Key) -> bool {
        let store = Arc::clone(self.source.store());
        self.controller.toggle_row(key, &store)
    }

    /// Adds rows to the selection.
    pub fn select_rows(&mut self, keys: &[R::Key]) -> bool {
        let store = Arc::clone(self.source.store());
        self.controller.select_rows(keys, &store)
    }

    /// Removes rows from the selection.
    pub fn deselect_rows(&mut self, keys: &[R::Key]) -> bool {
        let store = Arc::clone(self.source.store());
        self.controller.deselect_rows(keys, &store)
    }

    /// Selects every row that passes the filters, on all pages or on the
    /// current page depending on [`SelectAllMode`].
    pub fn select_all(&mut self) -> bool {
        let positions = self.arranged_positions();
        let candidates = match self.controller.select_all_mode() {
            SelectAllMode::AllPages => self.arranged_keys(&positions),
            SelectAllMode::Page => {
                let range = self.controller.pager().page_range(positions.len());
                self.arranged_keys(&positions[range])
            }
        };
        let store = Arc::clone(self.source.store());
        self.controller.select_all(candidates, &store)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> bool {
        let store = Arc::clone(self.source.store());
        self.controller.clear_selection(&store)
    }

    /// Replaces the selection, as the view's checkbox state reports it.
    pub fn set_user_selection(&mut self, keys: Vec<R::Key>) -> bool {
        let store = Arc::clone(self.source.store());
        self.controller.set_user_selection(keys, &store)
    }

    /// Reads the selection back from `widget` and treats it as a user change.
    pub fn sync_selection_from(&mut self, widget: &dyn GridWidget<R::Key>) -> bool {
        let keys: KeySelection<R::Key> = widget.selected_keys().into_iter().collect();
        self.set_user_selection(keys.to_vec())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Moves to page `index`.
    pub fn go_to_page(&mut self, index: usize) -> Result<bool> {
        let total = self.arranged_positions().len();
        self.controller.go_to_page(index, total)
    }

    /// Moves to the next page, if there is one.
    pub fn next_page(&mut self) -> bool {
        let total = self.arranged_positions().len();
        self.controller.next_page(total)
    }

    /// Moves to the previous page, if there is one.
    pub fn previous_page(&mut self) -> bool {
        self.controller.previous_page()
    }

    /// Applies a user page-size change and returns to the first page.
    pub fn change_page_size(&mut self, size: usize) -> Result<()> {
        self.controller.change_page_size(size)
    }

    /// Moves back to the last page if the rows shrank past the current one.
    ///
    /// The grid never does this on its own.
    pub fn clamp_page_index(&mut self) -> bool {
        let total = self.arranged_positions().len();
        self.controller.clamp_page_index(total)
    }

    // =========================================================================
    // Sorting and filtering
    // =========================================================================

    /// Sorts by `column`.
    pub fn sort_by(&mut self, column: &ColumnKey, direction: SortDirection) -> Result<bool> {
        self.controller.sort_by(column, direction, &self.projection)
    }

    /// Advances the header-click sort cycle of `column`.
    pub fn toggle_sort(&mut self, column: &ColumnKey) -> Result<bool> {
        self.controller.toggle_sort(column, &self.projection)
    }

    /// Removes the sort.
    pub fn clear_sort(&mut self) -> bool {
        self.controller.clear_sort()
    }

    /// Sets the filter on `column`.
    pub fn set_filter(&mut self, column: ColumnKey, condition: FilterCondition) -> Result<bool> {
        self.controller.set_filter(column, condition, &self.projection)
    }

    /// Removes the filter on `column`.
    pub fn clear_filter(&mut self, column: &ColumnKey) -> bool {
        self.controller.clear_filter(column)
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) -> bool {
        self.controller.clear_filters()
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Moves the column in display slot `from` to slot `to`.
    ///
    /// Requires `allow_column_reordering`. Column keys are content based in
    /// that mode, so a move never changes which key a column has. Takes
    /// effect on the next render.
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.config.allow_column_reordering {
            return Err(GridError::ColumnReorderingDisabled);
        }
        let count = self.projection.len();
        for index in [from, to] {
            if index >= count {
                return Err(GridError::ColumnOutOfRange { index, count });
            }
        }
        let mut order = self.projection.keys();
        let moved = order.remove(from);
        tracing::debug!(target: targets::GRID, column = %moved, from, to, "moved column");
        order.insert(to, moved);
        self.column_order = order;
        self.projection_stale = true;
        Ok(())
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Writes every filtered row, in sort order and across all pages, as CSV.
    ///
    /// Returns the number of rows written.
    pub fn export_csv<W: Write>(&self, writer: W, options: &CsvOptions) -> Result<usize> {
        if !self.config.is_excel_export {
            return Err(GridError::ExportDisabled);
        }
        let positions = self.arranged_positions();
        export::write_csv(
            writer,
            &self.projection,
            self.source.store().as_ref(),
            &positions,
            options,
        )
    }

    /// Exports as a CSV string.
    pub fn export_csv_string(&self, options: &CsvOptions) -> Result<String> {
        let mut buffer = Vec::new();
        self.export_csv(&mut buffer, options)?;
        String::from_utf8(buffer).map_err(|e| {
            GridError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl<R: Row> std::fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("controller", &self.controller)
            .field("projection", &self.projection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ValidationPolicy;
    use crate::grid::HeadlessGrid;
    use crate::model::{CellContent, CellValue, LookupTable};

    #[derive(Clone, Debug)]
    struct Loan {
        id: String,
        status: &'static str,
        balance: i64,
    }

    impl Row for Loan {
        type Key = String;

        fn key(&self) -> String {
            self.id.clone()
        }

        fn field(&self, name: &str) -> CellValue {
            match name {
                "id" => CellValue::from(&self.id),
                "status" => CellValue::from(self.status),
                "balance" => CellValue::from(self.balance),
                _ => CellValue::None,
            }
        }
    }

    fn loans(n: usize) -> Arc<Vec<Loan>> {
        Arc::new(
            (0..n)
                .map(|i| Loan {
                    id: format!("loan-{i:03}"),
                    status: if i % 2 == 0 { "approved" } else { "closed" },
                    balance: (n - i) as i64 * 1_000,
                })
                .collect(),
        )
    }

    fn columns() -> Arc<Vec<Column<Loan>>> {
        Arc::new(vec![
            Column::field("id", "Loan"),
            Column::field("status", "Status").with_lookup("loan_status"),
            Column::field("balance", "Balance"),
            Column::computed("Action", |_: &Loan| CellContent::text("Repay")).with_id("action"),
        ])
    }

    fn catalog() -> LookupCatalog {
        LookupCatalog::new().with_table(
            "loan_status",
            LookupTable::from_pairs([("approved", "Approved"), ("closed", "Closed")]),
        )
    }

    fn grid(config: GridConfig) -> Grid<Loan> {
        Grid::with_lookups(config.with_validation(ValidationPolicy::Strict), catalog()).unwrap()
    }

    #[test]
    fn test_render_basic_frame() {
        let mut grid = grid(GridConfig::new());
        let mut widget = HeadlessGrid::new();
        let frame = grid
            .render(&GridProps::new(loans(3), columns()), &mut widget)
            .unwrap();

        assert_eq!(frame.rows.len(), 3);
        assert_eq!(frame.mounted_column_count(), 4);
        assert_eq!(frame.rows[0].cells[1], CellContent::text("Approved"));
        assert_eq!(frame.rows[1].cells[1], CellContent::text("Closed"));
        assert!(frame.pager.is_none());
        assert_eq!(frame.page.size, 3);
        assert!(!frame.excel_export);
    }

    #[test]
    fn test_widget_calls_only_on_change() {
        let mut grid = grid(GridConfig::new().with_pager(true).with_page_size(10));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(25), columns());

        grid.render(&props, &mut widget).unwrap();
        let first = widget.calls();
        assert_eq!(first.columns, 1);
        assert_eq!(first.page, 1);
        assert_eq!(first.filter, 1);
        assert_eq!(first.selection, 1);

        grid.render(&props, &mut widget).unwrap();
        assert_eq!(widget.calls(), first);

        grid.next_page();
        grid.render(&props, &mut widget).unwrap();
        assert_eq!(widget.calls().page, 2);
        assert_eq!(widget.calls().columns, 1);
    }

    #[test]
    fn test_fresh_equal_columns_not_reapplied() {
        let mut grid = grid(GridConfig::new());
        let mut widget = HeadlessGrid::new();
        let rows = loans(3);

        grid.render(&GridProps::new(Arc::clone(&rows), columns()), &mut widget)
            .unwrap();
        grid.render(&GridProps::new(rows, columns()), &mut widget)
            .unwrap();
        assert_eq!(widget.calls().columns, 1);
    }

    #[test]
    fn test_remount_reapplies_everything() {
        let mut grid = grid(GridConfig::new().with_select(true));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(3), columns()).with_selected_row_keys(vec!["loan-001".into()]);

        grid.render(&props, &mut widget).unwrap();
        widget.remount();
        let frame = grid.render(&props, &mut widget).unwrap();

        assert_eq!(widget.calls().columns, 2);
        assert_eq!(widget.calls().selection, 2);
        assert_eq!(frame.selection, vec!["loan-001".to_string()]);
        assert!(frame.row(&"loan-001".to_string()).is_some_and(|r| r.selected));
    }

    #[test]
    fn test_paging_and_past_end() {
        let mut grid = grid(GridConfig::new().with_pager(true).with_page_size(10));
        let mut widget = HeadlessGrid::new();

        let frame = grid
            .render(&GridProps::new(loans(25), columns()).with_page_index(2), &mut widget)
            .unwrap();
        assert_eq!(frame.rows.len(), 5);
        assert_eq!(frame.page.count, 3);

        // Rows shrink; the index is left alone.
        let frame = grid
            .render(&GridProps::new(loans(8), columns()).with_page_index(2), &mut widget)
            .unwrap();
        assert!(frame.page.past_end);
        assert!(frame.rows.is_empty());
        assert_eq!(grid.page_index(), 2);

        assert!(grid.clamp_page_index());
        assert_eq!(grid.page_index(), 0);
    }

    #[test]
    fn test_go_to_page_out_of_range() {
        let mut grid = grid(GridConfig::new().with_pager(true).with_page_size(10));
        let mut widget = HeadlessGrid::new();
        grid.render(&GridProps::new(loans(15), columns()), &mut widget)
            .unwrap();

        assert!(grid.go_to_page(1).unwrap());
        assert!(matches!(
            grid.go_to_page(2),
            Err(GridError::PageOutOfRange { index: 2, page_count: 2 })
        ));
    }

    #[test]
    fn test_sort_and_filter_through_grid() {
        let mut grid = grid(GridConfig::new().with_filtering(true));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(6), columns());
        grid.render(&props, &mut widget).unwrap();

        grid.sort_by(&ColumnKey::Index(2), SortDirection::Ascending).unwrap();
        grid.set_filter(ColumnKey::Index(1), FilterCondition::contains("appr"))
            .unwrap();
        let frame = grid.render(&props, &mut widget).unwrap();

        let keys = frame.row_keys();
        assert_eq!(keys, vec!["loan-004", "loan-002", "loan-000"]);
        assert_eq!(widget.filters().len(), 1);
        assert_eq!(frame.filters.len(), 1);
        assert!(frame.filter_row);
    }

    #[test]
    fn test_rendered_field_column_filters() {
        let columns: Arc<Vec<Column<Loan>>> = Arc::new(vec![
            Column::field("id", "Loan"),
            Column::field("status", "Status").with_render(|loan: &Loan| {
                CellContent::text(if loan.status == "approved" { "OK" } else { "Done" })
            }),
        ]);
        let mut grid = grid(GridConfig::new().with_filtering(true));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(4), columns);
        grid.render(&props, &mut widget).unwrap();

        // Contains matches the displayed text.
        grid.set_filter(ColumnKey::Index(1), FilterCondition::contains("ok"))
            .unwrap();
        let frame = grid.render(&props, &mut widget).unwrap();
        assert_eq!(frame.row_keys(), vec!["loan-000", "loan-002"]);

        // Equals matches the field.
        grid.set_filter(
            ColumnKey::Index(1),
            FilterCondition::Equals(CellValue::from("closed")),
        )
        .unwrap();
        let frame = grid.render(&props, &mut widget).unwrap();
        assert_eq!(frame.row_keys(), vec!["loan-001", "loan-003"]);
        assert_eq!(frame.rows[0].cells[1], CellContent::text("Done"));
    }

    #[test]
    fn test_render_only_column_not_sortable() {
        let mut grid = grid(GridConfig::new());
        let mut widget = HeadlessGrid::new();
        grid.render(&GridProps::new(loans(2), columns()), &mut widget)
            .unwrap();
        assert!(matches!(
            grid.sort_by(&ColumnKey::Index(3), SortDirection::Ascending),
            Err(GridError::ColumnNotSortable { .. })
        ));
        assert!(matches!(
            grid.sort_by(&ColumnKey::Index(9), SortDirection::Ascending),
            Err(GridError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_select_all_pages_vs_page() {
        let rows = loans(25);
        for (mode, expected) in [(SelectAllMode::AllPages, 25), (SelectAllMode::Page, 10)] {
            let mut grid = grid(
                GridConfig::new()
                    .with_pager(true)
                    .with_page_size(10)
                    .with_select(true)
                    .with_select_all_mode(mode),
            );
            let mut widget = HeadlessGrid::new();
            grid.render(&GridProps::new(Arc::clone(&rows), columns()), &mut widget)
                .unwrap();
            assert!(grid.select_all());
            assert_eq!(grid.selected_keys().len(), expected);
        }
    }

    #[test]
    fn test_selection_changed_carries_rows() {
        let mut grid = grid(GridConfig::new().with_select(true));
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        grid.signals().selection_changed.connect(move |rows: &Vec<Loan>| {
            s.store(rows.iter().map(|l| l.balance as usize).sum(), Ordering::SeqCst);
        });

        let mut widget = HeadlessGrid::new();
        grid.render(&GridProps::new(loans(3), columns()), &mut widget)
            .unwrap();
        grid.select_rows(&["loan-000".into(), "loan-002".into()]);
        assert_eq!(seen.load(Ordering::SeqCst), 3_000 + 1_000);
    }

    #[test]
    fn test_sync_selection_from_widget() {
        let mut grid = grid(GridConfig::new().with_select(true));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(3), columns());
        grid.render(&props, &mut widget).unwrap();

        widget.set_visual_selection(vec!["loan-002".into()]);
        assert!(grid.sync_selection_from(&widget));
        assert_eq!(grid.selected_keys(), vec!["loan-002".to_string()]);
    }

    #[test]
    fn test_move_column() {
        let mut grid = grid(GridConfig::new().with_column_reordering(true));
        let mut widget = HeadlessGrid::new();
        let props = GridProps::new(loans(1), columns());
        grid.render(&props, &mut widget).unwrap();

        grid.move_column(3, 0).unwrap();
        let frame = grid.render(&props, &mut widget).unwrap();
        assert_eq!(frame.columns[0].key, ColumnKey::Id("action".into()));
        assert_eq!(frame.rows[0].cells[0], CellContent::text("Repay"));
        assert_eq!(widget.calls().columns, 2);

        assert!(matches!(
            grid.move_column(0, 7),
            Err(GridError::ColumnOutOfRange { index: 7, count: 4 })
        ));
    }

    #[test]
    fn test_move_column_requires_reordering() {
        let mut grid = grid(GridConfig::new());
        assert!(matches!(
            grid.move_column(0, 1),
            Err(GridError::ColumnReorderingDisabled)
        ));
    }

    #[test]
    fn test_strict_error_keeps_previous_state() {
        let mut grid = grid(GridConfig::new());
        let mut widget = HeadlessGrid::new();
        grid.render(&GridProps::new(loans(3), columns()), &mut widget)
            .unwrap();

        let broken: Arc<Vec<Column<Loan>>> = Arc::new(vec![Column::new("Nothing")]);
        assert!(grid.render(&GridProps::new(loans(3), broken), &mut widget).is_err());
        assert_eq!(grid.projection().len(), 4);
    }

    #[test]
    fn test_export_disabled() {
        let grid = grid(GridConfig::new());
        assert!(matches!(
            grid.export_csv_string(&CsvOptions::new()),
            Err(GridError::ExportDisabled)
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Grid::<Loan>::new(GridConfig::new().with_page_size(0)),
            Err(GridError::InvalidConfig(_))
        ));
    }
}
