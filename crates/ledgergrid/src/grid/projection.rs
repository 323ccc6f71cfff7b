//! Render projection: column descriptors to widget columns.
//!
//! A projection keeps one slot per descriptor, hidden columns included, so
//! column keys and positions stay stable across render passes. Cells are
//! rendered through the same projection for display, filtering and export.

use std::collections::HashSet;
use std::sync::Arc;

use ledgergrid_core::logging::targets;

use crate::error::{GridError, Result, ValidationPolicy};
use crate::model::{
    CellContent, CellRenderer, CellValue, Column, ColumnKey, ColumnKeyStrategy,
    HorizontalAlignment, LookupCatalog, LookupSource, LookupTable, Row,
};

/// A column as handed to the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedColumn {
    /// Stable key.
    pub key: ColumnKey,
    /// Position of the descriptor in the caller's column list.
    pub source_index: usize,
    /// Header caption.
    pub caption: String,
    /// Row field the column reads.
    pub data_field: Option<String>,
    /// Whether the column is shown to the user.
    pub visible: bool,
    /// Preferred width in pixels.
    pub width: Option<u32>,
    /// Minimum width in pixels.
    pub min_width: Option<u32>,
    /// Cell alignment.
    pub alignment: HorizontalAlignment,
    /// Whether cells come from a custom renderer.
    pub has_renderer: bool,
    /// Resolved lookup table.
    pub lookup: Option<Arc<LookupTable>>,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Whether the column appears in the filter row.
    pub filterable: bool,
    /// Whether the column is written by export.
    pub exportable: bool,
}

/// The projected column set of one grid.
pub struct Projection<R> {
    columns: Vec<ProjectedColumn>,
    renderers: Vec<Option<CellRenderer<R>>>,
}

impl<R> Default for Projection<R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            renderers: Vec::new(),
        }
    }
}

impl<R: Row> Projection<R> {
    /// Projects `columns` in their given order.
    ///
    /// `user_order` holds the keys of columns the user has moved; those slots
    /// are arranged in that order ahead of any column it does not mention.
    pub fn build(
        columns: &[Column<R>],
        catalog: &LookupCatalog,
        strategy: ColumnKeyStrategy,
        policy: ValidationPolicy,
        user_order: &[ColumnKey],
    ) -> Result<Self> {
        let mut projected = Vec::with_capacity(columns.len());
        let mut renderers = Vec::with_capacity(columns.len());
        let mut seen = HashSet::with_capacity(columns.len());

        for (index, column) in columns.iter().enumerate() {
            if !column.has_source() {
                policy.check(GridError::ColumnWithoutSource {
                    index,
                    caption: column.caption.clone(),
                })?;
            }

            let key = match strategy.key_for(index, column) {
                Some(key) => key,
                None => {
                    policy.check(GridError::MissingColumnKey {
                        index,
                        caption: column.caption.clone(),
                    })?;
                    ColumnKey::Index(index)
                }
            };
            let key = if seen.contains(&key) {
                policy.check(GridError::DuplicateColumnKey {
                    key: key.to_string(),
                })?;
                ColumnKey::Index(index)
            } else {
                key
            };
            seen.insert(key.clone());

            let lookup = match &column.lookup {
                Some(LookupSource::Inline(table)) => Some(Arc::clone(table)),
                Some(LookupSource::Named(name)) => match catalog.get(name) {
                    Some(table) => Some(Arc::clone(table)),
                    None => {
                        policy.check(GridError::UnknownLookup {
                            name: name.clone(),
                            caption: column.caption.clone(),
                        })?;
                        None
                    }
                },
                None => None,
            };

            let has_source = column.has_source();
            projected.push(ProjectedColumn {
                key,
                source_index: index,
                caption: column.caption.clone(),
                data_field: column.field.clone(),
                visible: column.visible,
                width: column.width,
                min_width: column.min_width,
                alignment: column.alignment,
                has_renderer: column.render.is_some(),
                lookup,
                sortable: column.field.is_some(),
                filterable: column.visible && has_source,
                exportable: column.visible,
            });
            renderers.push(column.render.clone());
        }

        let mut projection = Self {
            columns: projected,
            renderers,
        };
        projection.arrange(user_order);

        tracing::debug!(
            target: targets::PROJECTION,
            slots = projection.len(),
            shown = projection.shown_count(),
            "projected columns"
        );
        Ok(projection)
    }

    fn arrange(&mut self, user_order: &[ColumnKey]) {
        if user_order.is_empty() {
            return;
        }
        let rank = |key: &ColumnKey| {
            user_order
                .iter()
                .position(|k| k == key)
                .unwrap_or(usize::MAX)
        };
        let mut slots: Vec<(ProjectedColumn, Option<CellRenderer<R>>)> = self
            .columns
            .drain(..)
            .zip(self.renderers.drain(..))
            .collect();
        slots.sort_by_key(|(column, _)| rank(&column.key));
        let (columns, renderers): (Vec<_>, Vec<_>) = slots.into_iter().unzip();
        self.columns = columns;
        self.renderers = renderers;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the projected columns in display order.
    pub fn columns(&self) -> &[ProjectedColumn] {
        &self.columns
    }

    /// Returns the number of mounted slots (hidden columns included).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the number of columns shown to the user.
    pub fn shown_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    /// Returns the column keys in display order.
    pub fn keys(&self) -> Vec<ColumnKey> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    /// Returns the slot holding `key`.
    pub fn slot_of(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| &c.key == key)
    }

    /// Returns the column holding `key`.
    pub fn column(&self, key: &ColumnKey) -> Option<&ProjectedColumn> {
        self.columns.iter().find(|c| &c.key == key)
    }

    // =========================================================================
    // Cells
    // =========================================================================

    /// Renders the cell of `row` in `slot`.
    ///
    /// Hidden columns and columns without a source render nothing. A custom
    /// renderer wins; otherwise a lookup label replaces the raw value when
    /// one is known, and the raw value is shown as-is when it is not.
    pub fn render_cell(&self, slot: usize, row: &R) -> CellContent {
        let Some(column) = self.columns.get(slot) else {
            return CellContent::Empty;
        };
        if !column.visible {
            return CellContent::Empty;
        }
        if let Some(Some(render)) = self.renderers.get(slot) {
            return render(row);
        }
        self.field_content(column, row)
    }

    fn field_content(&self, column: &ProjectedColumn, row: &R) -> CellContent {
        let Some(field) = &column.data_field else {
            return CellContent::Empty;
        };
        let value = row.field(field);
        if let Some(label) = column.lookup.as_ref().and_then(|t| t.label_for(&value)) {
            return CellContent::text(label);
        }
        CellContent::Value(value)
    }

    /// Displayed text of a cell, as used by filtering and export.
    ///
    /// Unlike [`render_cell`](Self::render_cell) this ignores visibility.
    pub fn cell_text(&self, slot: usize, row: &R) -> String {
        let Some(column) = self.columns.get(slot) else {
            return String::new();
        };
        match self.renderers.get(slot) {
            Some(Some(render)) => render(row).to_text(),
            _ => self.field_content(column, row).to_text(),
        }
    }

    /// Raw value of a cell, as used by sorting and exact-match filters.
    ///
    /// Render-only columns yield their rendered text.
    pub fn cell_value(&self, slot: usize, row: &R) -> CellValue {
        let Some(column) = self.columns.get(slot) else {
            return CellValue::None;
        };
        match &column.data_field {
            Some(field) => row.field(field),
            None => match self.renderers.get(slot) {
                Some(Some(render)) => match render(row) {
                    CellContent::Value(value) => value,
                    other => CellValue::String(other.to_text()),
                },
                _ => CellValue::None,
            },
        }
    }
}

impl<R> std::fmt::Debug for Projection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projection")
            .field("columns", &self.columns)
            .finish()
    }
}
