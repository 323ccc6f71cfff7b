//! ledgergrid - a headless, controlled data-grid adapter.
//!
//! The grid sits between a caller that owns the data (and, optionally, the
//! page index and row selection) and a stateful view. Every render pass is a
//! projection of `(rows, columns, view state)` into a [`GridFrame`]; every
//! imperative call to the view goes through the [`GridWidget`] trait; every
//! user interaction is reported on a [`Signal`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ledgergrid::prelude::*;
//!
//! #[derive(Clone)]
//! struct Contract {
//!     id: u32,
//!     maximum_amount: i64,
//!     product_type: &'static str,
//! }
//!
//! impl Row for Contract {
//!     type Key = u32;
//!
//!     fn key(&self) -> u32 {
//!         self.id
//!     }
//!
//!     fn field(&self, name: &str) -> CellValue {
//!         match name {
//!             "maximum_amount" => self.maximum_amount.into(),
//!             "product_type" => self.product_type.into(),
//!             _ => CellValue::None,
//!         }
//!     }
//! }
//!
//! let lookups = LookupCatalog::new().with_table(
//!     "product_type",
//!     LookupTable::from_pairs([("line_of_credit", "Line of Credit")]),
//! );
//! let mut grid = Grid::with_lookups(GridConfig::new().with_pager(true), lookups)?;
//!
//! let rows = Arc::new(vec![Contract { id: 1, maximum_amount: 1_000_000, product_type: "line_of_credit" }]);
//! let columns = Arc::new(vec![
//!     Column::field("product_type", "Product").with_lookup("product_type"),
//!     Column::field("maximum_amount", "Maximum Amount"),
//! ]);
//!
//! let mut widget = HeadlessGrid::new();
//! let frame = grid.render(&GridProps::new(rows, columns), &mut widget)?;
//!
//! assert_eq!(frame.rows[0].cells[0], CellContent::text("Line of Credit"));
//! # Ok::<(), ledgergrid::GridError>(())
//! ```

pub use ledgergrid_core::{ConnectionId, PropWatch, Property, Signal, logging};

pub mod config;
mod error;
pub mod export;
pub mod grid;
pub mod model;
pub mod prelude;

pub use config::GridConfig;
pub use error::{GridError, Result, ValidationPolicy};
pub use export::CsvOptions;
pub use grid::{Grid, GridFrame, GridProps, GridSignals, GridWidget, HeadlessGrid};
