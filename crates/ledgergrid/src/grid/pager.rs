//! Pagination state.

use std::ops::Range;

use ledgergrid_core::Property;

use crate::error::{GridError, Result};

/// Page index and page size of a grid.
///
/// When the pager is disabled every row is shown on a single page and the
/// index is kept but ignored.
///
/// The index is never clamped automatically when the row count shrinks: a
/// page past the end simply renders no rows. Use [`is_past_end`](Self::is_past_end)
/// to detect it and [`clamp`](Self::clamp) to correct it explicitly.
#[derive(Debug, Clone)]
pub struct Pager {
    enabled: bool,
    page_index: Property<usize>,
    page_size: Property<usize>,
    allowed_page_sizes: Vec<usize>,
    show_size_selector: bool,
}

impl Pager {
    /// Creates a pager on the first page.
    pub fn new(
        enabled: bool,
        page_size: usize,
        allowed_page_sizes: Vec<usize>,
        show_size_selector: bool,
    ) -> Self {
        Self {
            enabled,
            page_index: Property::new(0),
            page_size: Property::new(page_size),
            allowed_page_sizes,
            show_size_selector,
        }
    }

    /// Returns `true` if rows are split into pages.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the current page index.
    pub fn page_index(&self) -> usize {
        self.page_index.get()
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Returns the page sizes offered to the user.
    pub fn allowed_page_sizes(&self) -> &[usize] {
        &self.allowed_page_sizes
    }

    /// Returns `true` if the page-size selector is shown.
    pub fn show_size_selector(&self) -> bool {
        self.show_size_selector
    }

    /// Checks that `size` may be selected.
    pub fn validate_page_size(&self, size: usize) -> Result<()> {
        let offered = self.allowed_page_sizes.is_empty() || self.allowed_page_sizes.contains(&size);
        if size == 0 || !offered {
            return Err(GridError::PageSizeNotAllowed {
                size,
                allowed: self.allowed_page_sizes.clone(),
            });
        }
        Ok(())
    }

    /// Changes the page size and returns to the first page.
    ///
    /// The index is reset even when the size is unchanged. Returns `true` if
    /// the index moved.
    pub fn set_page_size(&self, size: usize) -> Result<bool> {
        self.validate_page_size(size)?;
        self.page_size.set(size);
        Ok(self.page_index.set(0))
    }

    /// Sets the page index without range checks. Returns `true` if it changed.
    pub fn set_page_index(&self, index: usize) -> bool {
        self.page_index.set(index)
    }

    /// Moves to `index`, which must be an existing page for `total` rows.
    pub fn go_to(&self, index: usize, total: usize) -> Result<bool> {
        let page_count = self.page_count(total);
        if index >= page_count {
            return Err(GridError::PageOutOfRange { index, page_count });
        }
        Ok(self.page_index.set(index))
    }

    /// Number of pages for `total` rows. Never less than one.
    pub fn page_count(&self, total: usize) -> usize {
        if !self.enabled {
            return 1;
        }
        total.div_ceil(self.page_size().max(1)).max(1)
    }

    /// Positions of the rows on the current page, within `0..total`.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        if !self.enabled {
            return 0..total;
        }
        let size = self.page_size();
        let start = self.page_index().saturating_mul(size).min(total);
        let end = start.saturating_add(size).min(total);
        start..end
    }

    /// Returns `true` if the current page starts beyond the last row.
    pub fn is_past_end(&self, total: usize) -> bool {
        self.enabled
            && self.page_index() > 0
            && self.page_index().saturating_mul(self.page_size()) >= total
    }

    /// Moves to the last page if the current one is past the end.
    /// Returns `true` if the index moved.
    pub fn clamp(&self, total: usize) -> bool {
        if self.is_past_end(total) {
            self.page_index.set(self.page_count(total) - 1)
        } else {
            false
        }
    }
}
