//! Error types for the grid adapter.

use ledgergrid_core::logging::targets;
use serde::{Deserialize, Serialize};

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while building or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Two rows in the same data source share a key.
    #[error("Duplicate row key {key}")]
    DuplicateKey { key: String },

    /// A column has neither a field nor a custom renderer.
    #[error("Column {index} ('{caption}') has neither a field nor a renderer")]
    ColumnWithoutSource { index: usize, caption: String },

    /// A column has no content-stable key while columns may be reordered.
    #[error("Column {index} ('{caption}') needs an id or field to be reorderable")]
    MissingColumnKey { index: usize, caption: String },

    /// Two columns resolve to the same key.
    #[error("Duplicate column key {key}")]
    DuplicateColumnKey { key: String },

    /// A column names a lookup table that was not injected.
    #[error("Unknown lookup table '{name}' for column '{caption}'")]
    UnknownLookup { name: String, caption: String },

    /// No column carries the requested key.
    #[error("No column with key {key}")]
    UnknownColumn { key: String },

    /// A column position is outside the column list.
    #[error("Column position {index} out of range for {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },

    /// Hidden columns are excluded from filtering.
    #[error("Column {key} is hidden and cannot be filtered")]
    ColumnHidden { key: String },

    /// The column has no field to sort by, or sorting is disabled.
    #[error("Column {key} cannot be sorted")]
    ColumnNotSortable { key: String },

    /// The requested page size is not offered by the pager.
    #[error("Page size {size} is not one of the allowed sizes {allowed:?}")]
    PageSizeNotAllowed { size: usize, allowed: Vec<usize> },

    /// The requested page does not exist.
    #[error("Page {index} is out of range ({page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },

    /// Columns were moved while reordering is disabled.
    #[error("Column reordering is disabled for this grid")]
    ColumnReorderingDisabled,

    /// Export was requested from a grid without the export capability.
    #[error("Export is not enabled for this grid")]
    ExportDisabled,

    /// The grid configuration is inconsistent.
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// TOML configuration could not be parsed.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("Failed to write TOML configuration: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON configuration could not be parsed or written.
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Returns `true` for malformed input the caller handed to the grid
    /// (as opposed to user actions the grid refused or I/O failures).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. }
                | Self::ColumnWithoutSource { .. }
                | Self::MissingColumnKey { .. }
                | Self::DuplicateColumnKey { .. }
                | Self::UnknownLookup { .. }
        )
    }
}

/// How precondition violations in caller-supplied data are handled.
///
/// Defaults to `Strict` in debug builds and `Lenient` in release builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Return the error to the caller.
    Strict,
    /// Log a warning and render on a best-effort basis.
    Lenient,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

impl ValidationPolicy {
    /// Applies the policy to a precondition violation.
    ///
    /// Returns the error under `Strict`; logs it and returns `Ok(())` under
    /// `Lenient` so the caller can continue with its fallback.
    pub fn check(self, err: GridError) -> Result<()> {
        match self {
            Self::Strict => Err(err),
            Self::Lenient => {
                tracing::warn!(target: targets::GRID, error = %err, "precondition violated, rendering best effort");
                Ok(())
            }
        }
    }
}
