//! Row data model for ledgergrid.
//!
//! This module provides the types a caller uses to describe what a grid
//! shows:
//!
//! - `Row`: the trait every record implements (stable key + field access)
//! - `CellValue` / `CellContent`: raw field values and rendered cell content
//! - `DataSource` / `RowStore`: the keyed, memoized view of a row array
//! - `Column`: declarative column descriptors
//! - `LookupTable` / `LookupCatalog`: injected value-to-label maps
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Arc<Vec<R>> │────>│ DataSource  │────>│  RowStore   │
//! │  (caller)   │     │ (ptr memo)  │     │ (key index) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐            │
//! │ Column<R>[] │────>│ LookupTable │────> cell content
//! └─────────────┘     └─────────────┘
//! ```

mod column;
mod data_source;
mod lookup;
mod traits;
mod value;

pub use column::{CellRenderer, Column, ColumnKey, ColumnKeyStrategy};
pub use data_source::{DataSource, RowStore};
pub use lookup::{LookupCatalog, LookupEntry, LookupSource, LookupTable};
pub use traits::Row;
pub use value::{CellContent, CellValue, HorizontalAlignment};
