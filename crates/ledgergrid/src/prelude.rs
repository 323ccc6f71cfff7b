//! Prelude module for ledgergrid.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use ledgergrid::prelude::*;
//! ```

// ============================================================================
// Grid
// ============================================================================

pub use crate::config::GridConfig;
pub use crate::error::{GridError, ValidationPolicy};
pub use crate::export::CsvOptions;
pub use crate::grid::{
    ColumnFilter, FilterCondition, Grid, GridFrame, GridProps, GridSignals, GridWidget,
    HeadlessGrid, PageInfo, SelectAllMode, SelectionSync, SortDirection, SortOrder,
};

// ============================================================================
// Data Model
// ============================================================================

pub use crate::model::{
    CellContent, CellValue, Column, ColumnKey, HorizontalAlignment, LookupCatalog, LookupTable,
    Row,
};

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use ledgergrid_core::{ConnectionId, Signal};
