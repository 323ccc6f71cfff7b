//! Grid configuration.
//!
//! [`GridConfig`] holds the construction-time options of a grid. It can be
//! built in code or loaded from TOML or JSON; every field is optional in
//! the file and falls back to its default.
//!
//! ```
//! use ledgergrid::GridConfig;
//!
//! let config = GridConfig::from_toml_str(
//!     r#"
//!     pager = true
//!     page_size = 20
//!     select = true
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.pager);
//! assert_eq!(config.page_size, 20);
//! assert_eq!(config.allowed_page_sizes, vec![10, 20, 50]);
//! assert!(!config.filtering);
//! ```

use std::collections::HashSet;
use std::path::Path;

use ledgergrid_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result, ValidationPolicy};
use crate::grid::{SelectAllMode, SelectionSync};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default page sizes offered by the size selector.
pub const DEFAULT_ALLOWED_PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// Construction-time options of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Split rows into pages and show the pager.
    pub pager: bool,
    /// Initial page size.
    pub page_size: usize,
    /// Page sizes offered by the size selector.
    pub allowed_page_sizes: Vec<usize>,
    /// Show the page-size selector.
    pub pager_size_selector: bool,
    /// Show the per-column filter row.
    pub filtering: bool,
    /// Enable multi-row selection.
    pub select: bool,
    /// Scope of "select all".
    pub select_all_mode: SelectAllMode,
    /// Turn header sorting off.
    pub is_sorting_disabled: bool,
    /// Offer export.
    pub is_excel_export: bool,
    /// Let the user reorder columns. Forces content-based column keys.
    pub allow_column_reordering: bool,
    /// How selection is pushed to the widget.
    pub selection_sync: SelectionSync,
    /// How malformed rows and columns are handled.
    pub validation: ValidationPolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pager: false,
            page_size: DEFAULT_PAGE_SIZE,
            allowed_page_sizes: DEFAULT_ALLOWED_PAGE_SIZES.to_vec(),
            pager_size_selector: true,
            filtering: false,
            select: false,
            select_all_mode: SelectAllMode::default(),
            is_sorting_disabled: false,
            is_excel_export: false,
            allow_column_reordering: false,
            selection_sync: SelectionSync::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl GridConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Loads a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded grid configuration");
        Ok(config)
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded grid configuration");
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Checks the configuration for inconsistencies.
    ///
    /// A zero page size, a zero allowed size and repeated allowed sizes are
    /// errors. A page size the selector does not offer is only warned about.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GridError::InvalidConfig("page_size must be greater than zero".into()));
        }
        if self.allowed_page_sizes.contains(&0) {
            return Err(GridError::InvalidConfig(
                "allowed_page_sizes must not contain zero".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.allowed_page_sizes.len());
        if let Some(repeated) = self.allowed_page_sizes.iter().find(|size| !seen.insert(**size)) {
            return Err(GridError::InvalidConfig(format!(
                "allowed_page_sizes lists {repeated} more than once"
            )));
        }
        if self.pager
            && self.pager_size_selector
            && !self.allowed_page_sizes.is_empty()
            && !self.allowed_page_sizes.contains(&self.page_size)
        {
            tracing::warn!(
                target: targets::CONFIG,
                page_size = self.page_size,
                allowed = ?self.allowed_page_sizes,
                "page size is not offered by the size selector"
            );
        }
        Ok(())
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Turns the pager on or off.
    pub fn with_pager(mut self, pager: bool) -> Self {
        self.pager = pager;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered by the size selector.
    pub fn with_allowed_page_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.allowed_page_sizes = sizes.into();
        self
    }

    /// Shows or hides the page-size selector.
    pub fn with_pager_size_selector(mut self, show: bool) -> Self {
        self.pager_size_selector = show;
        self
    }

    /// Shows or hides the filter row.
    pub fn with_filtering(mut self, filtering: bool) -> Self {
        self.filtering = filtering;
        self
    }

    /// Enables or disables multi-row selection.
    pub fn with_select(mut self, select: bool) -> Self {
        self.select = select;
        self
    }

    /// Sets the scope of "select all".
    pub fn with_select_all_mode(mut self, mode: SelectAllMode) -> Self {
        self.select_all_mode = mode;
        self
    }

    /// Turns sorting off.
    pub fn with_sorting_disabled(mut self, disabled: bool) -> Self {
        self.is_sorting_disabled = disabled;
        self
    }

    /// Offers export.
    pub fn with_excel_export(mut self, export: bool) -> Self {
        self.is_excel_export = export;
        self
    }

    /// Lets the user reorder columns.
    pub fn with_column_reordering(mut self, allow: bool) -> Self {
        self.allow_column_reordering = allow;
        self
    }

    /// Sets how selection is pushed to the widget.
    pub fn with_selection_sync(mut self, sync: SelectionSync) -> Self {
        self.selection_sync = sync;
        self
    }

    /// Sets the validation policy.
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }
}
