//! The output of one render pass.

use crate::model::{CellContent, Row};

use super::filter::ColumnFilter;
use super::projection::ProjectedColumn;
use super::selection::SelectAllMode;
use super::sort::SortOrder;

/// Where the grid is in its row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page index.
    pub index: usize,
    /// Page size. Equals `total_rows` when the pager is off.
    pub size: usize,
    /// Number of pages (at least one).
    pub count: usize,
    /// Rows left after filtering.
    pub total_rows: usize,
    /// Rows supplied by the caller.
    pub source_rows: usize,
    /// `true` if the page index points beyond the last row.
    pub past_end: bool,
}

/// Pager controls to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    /// Sizes offered in the size selector.
    pub allowed_page_sizes: Vec<usize>,
    /// Whether the size selector is shown.
    pub show_size_selector: bool,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow<K> {
    /// Row key.
    pub key: K,
    /// Whether the row is shown as selected.
    pub selected: bool,
    /// One cell per column slot, in display order.
    pub cells: Vec<CellContent>,
}

/// Everything a view needs to draw the grid.
#[derive(Clone)]
pub struct GridFrame<R: Row> {
    /// Projected columns, one per slot, hidden ones included.
    pub columns: Vec<ProjectedColumn>,
    /// Rows on the current page.
    pub rows: Vec<RenderedRow<R::Key>>,
    /// Paging position.
    pub page: PageInfo,
    /// Pager controls, when the pager is on.
    pub pager: Option<PagerView>,
    /// Whether the per-column filter row is shown.
    pub filter_row: bool,
    /// Active filters.
    pub filters: Vec<ColumnFilter>,
    /// Whether header clicks sort.
    pub sorting_enabled: bool,
    /// Active sort.
    pub sort: Option<SortOrder>,
    /// Selected keys the view shows, restricted to loaded rows.
    pub selection: Vec<R::Key>,
    /// Whether selection checkboxes are shown.
    pub select: bool,
    /// Scope of the "select all" checkbox.
    pub select_all_mode: SelectAllMode,
    /// Whether the export button is offered.
    pub excel_export: bool,
}

impl<R: Row> std::fmt::Debug for GridFrame<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridFrame")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("page", &self.page)
            .field("pager", &self.pager)
            .field("filter_row", &self.filter_row)
            .field("filters", &self.filters)
            .field("sorting_enabled", &self.sorting_enabled)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("select", &self.select)
            .field("select_all_mode", &self.select_all_mode)
            .field("excel_export", &self.excel_export)
            .finish()
    }
}

impl<R: Row> GridFrame<R> {
    /// Number of mounted column slots, hidden columns included.
    pub fn mounted_column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of columns shown to the user.
    pub fn shown_column_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    /// Keys of the rows on the current page.
    pub fn row_keys(&self) -> Vec<R::Key> {
        self.rows.iter().map(|r| r.key.clone()).collect()
    }

    /// Returns the rendered row with `key`, if it is on the current page.
    pub fn row(&self, key: &R::Key) -> Option<&RenderedRow<R::Key>> {
        self.rows.iter().find(|r| &r.key == key)
    }
}
