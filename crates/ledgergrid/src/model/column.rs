//! Declarative column descriptors.

use std::fmt;
use std::sync::Arc;

use super::lookup::{LookupSource, LookupTable};
use super::traits::Row;
use super::value::{CellContent, HorizontalAlignment};

/// Custom cell renderer.
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> CellContent + Send + Sync>;

/// Describes one grid column.
///
/// A column reads either a named `field` of the row, or computes its content
/// with a custom `render` function (action and derived columns), or both.
/// With both, the renderer wins for display and `Contains` filters (which
/// match displayed text), while the field drives sorting and `Equals`
/// filters.
///
/// Descriptors are plain values: build a fresh list per render pass and hand
/// it over in an `Arc`. The grid never mutates them.
///
/// # Example
///
/// ```
/// use ledgergrid::model::{CellContent, Column, HorizontalAlignment};
/// # use ledgergrid::model::{CellValue, Row};
/// # #[derive(Clone)]
/// # struct Contract { id: u32, maximum_amount: i64 }
/// # impl Row for Contract {
/// #     type Key = u32;
/// #     fn key(&self) -> u32 { self.id }
/// #     fn field(&self, name: &str) -> CellValue {
/// #         match name { "maximum_amount" => self.maximum_amount.into(), _ => CellValue::None }
/// #     }
/// # }
///
/// let columns: Vec<Column<Contract>> = vec![
///     Column::field("maximum_amount", "Maximum Amount")
///         .with_alignment(HorizontalAlignment::Right)
///         .with_width(140),
///     Column::computed("Actions", |c: &Contract| CellContent::text(format!("Edit #{}", c.id)))
///         .with_id("actions"),
///     Column::field("id", "Internal Id").hidden(),
/// ];
/// assert_eq!(columns.len(), 3);
/// ```
pub struct Column<R> {
    /// Explicit content-stable identifier.
    pub id: Option<String>,
    /// Row field this column reads.
    pub field: Option<String>,
    /// Header caption.
    pub caption: String,
    /// Whether the column is shown. Hidden columns keep their slot.
    pub visible: bool,
    /// Preferred width in pixels.
    pub width: Option<u32>,
    /// Minimum width in pixels.
    pub min_width: Option<u32>,
    /// Cell alignment.
    pub alignment: HorizontalAlignment,
    /// Custom renderer.
    pub render: Option<CellRenderer<R>>,
    /// Value-to-label lookup.
    pub lookup: Option<LookupSource>,
}

impl<R: Row> Column<R> {
    /// Creates a column with only a caption. Add a field or renderer before use.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            id: None,
            field: None,
            caption: caption.into(),
            visible: true,
            width: None,
            min_width: None,
            alignment: HorizontalAlignment::default(),
            render: None,
            lookup: None,
        }
    }

    /// Creates a column bound to a row field.
    pub fn field(field: impl Into<String>, caption: impl Into<String>) -> Self {
        let mut column = Self::new(caption);
        column.field = Some(field.into());
        column
    }

    /// Creates a column rendered by a function of the row.
    pub fn computed<F>(caption: impl Into<String>, render: F) -> Self
    where
        F: Fn(&R) -> CellContent + Send + Sync + 'static,
    {
        Self::new(caption).with_render(render)
    }

    /// Sets the explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Marks the column hidden.
    pub fn hidden(self) -> Self {
        self.with_visible(false)
    }

    /// Sets visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the preferred width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the minimum width.
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Sets the alignment.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the custom renderer.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&R) -> CellContent + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Uses the catalog table registered under `name`.
    pub fn with_lookup(mut self, name: impl Into<String>) -> Self {
        self.lookup = Some(LookupSource::Named(name.into()));
        self
    }

    /// Uses an inline lookup table.
    pub fn with_lookup_table(mut self, table: LookupTable) -> Self {
        self.lookup = Some(LookupSource::Inline(Arc::new(table)));
        self
    }

    /// Returns `true` if the column has something to render.
    pub fn has_source(&self) -> bool {
        self.field.is_some() || self.render.is_some()
    }

    /// Content-stable key: explicit id, else field.
    pub fn content_key(&self) -> Option<&str> {
        self.id.as_deref().or(self.field.as_deref())
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            field: self.field.clone(),
            caption: self.caption.clone(),
            visible: self.visible,
            width: self.width,
            min_width: self.min_width,
            alignment: self.alignment,
            render: self.render.clone(),
            lookup: self.lookup.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("caption", &self.caption)
            .field("visible", &self.visible)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("alignment", &self.alignment)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("lookup", &self.lookup)
            .finish()
    }
}

/// Stable identity of a column across render passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// Position in the descriptor list.
    Index(usize),
    /// Explicit column id.
    Id(String),
    /// Field name.
    Field(String),
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Index(index) => write!(f, "#{index}"),
            ColumnKey::Id(id) => write!(f, "id:{id}"),
            ColumnKey::Field(field) => write!(f, "field:{field}"),
        }
    }
}

/// How column keys are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKeyStrategy {
    /// Key by position. Only valid while columns are never reordered,
    /// inserted or removed at runtime.
    #[default]
    Index,
    /// Key by explicit id, else field.
    Content,
}

impl ColumnKeyStrategy {
    /// The strategy a grid must use given its reordering setting.
    pub fn for_reordering(allow_column_reordering: bool) -> Self {
        if allow_column_reordering {
            Self::Content
        } else {
            Self::Index
        }
    }

    /// Derives the key for the column at `index`, if one can be derived.
    pub fn key_for<R: Row>(self, index: usize, column: &Column<R>) -> Option<ColumnKey> {
        match self {
            Self::Index => Some(ColumnKey::Index(index)),
            Self::Content => match (&column.id, &column.field) {
                (Some(id), _) => Some(ColumnKey::Id(id.clone())),
                (None, Some(field)) => Some(ColumnKey::Field(field.clone())),
                (None, None) => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[derive(Clone)]
    struct Loan {
        id: u32,
    }

    impl Row for Loan {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn field(&self, _name: &str) -> CellValue {
            CellValue::None
        }
    }

    #[test]
    fn test_builders() {
        let column: Column<Loan> = Column::field("status", "Status")
            .with_width(120)
            .with_min_width(80)
            .with_lookup("loan_status")
            .hidden();
        assert_eq!(column.field.as_deref(), Some("status"));
        assert_eq!(column.width, Some(120));
        assert_eq!(column.min_width, Some(80));
        assert!(!column.visible);
        assert_eq!(column.lookup, Some(LookupSource::Named("loan_status".into())));
        assert!(column.has_source());
    }

    #[test]
    fn test_computed_column_has_source() {
        let column: Column<Loan> =
            Column::computed("Action", |loan: &Loan| CellContent::text(format!("#{}", loan.id)));
        assert!(column.has_source());
        assert!(column.content_key().is_none());
        assert!(!Column::<Loan>::new("Empty").has_source());
    }

    #[test]
    fn test_key_strategies() {
        let by_field: Column<Loan> = Column::field("amount", "Amount");
        let by_id: Column<Loan> = Column::field("amount", "Amount").with_id("amount_col");
        let render_only: Column<Loan> =
            Column::computed("Action", |_: &Loan| CellContent::Empty);

        assert_eq!(
            ColumnKeyStrategy::Index.key_for(3, &by_field),
            Some(ColumnKey::Index(3))
        );
        assert_eq!(
            ColumnKeyStrategy::Content.key_for(3, &by_field),
            Some(ColumnKey::Field("amount".into()))
        );
        assert_eq!(
            ColumnKeyStrategy::Content.key_for(3, &by_id),
            Some(ColumnKey::Id("amount_col".into()))
        );
        assert_eq!(ColumnKeyStrategy::Content.key_for(3, &render_only), None);
    }

    #[test]
    fn test_reordering_forces_content_keys() {
        assert_eq!(ColumnKeyStrategy::for_reordering(true), ColumnKeyStrategy::Content);
        assert_eq!(ColumnKeyStrategy::for_reordering(false), ColumnKeyStrategy::Index);
    }
}
