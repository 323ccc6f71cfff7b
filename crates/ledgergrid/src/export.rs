//! CSV export of grid contents.
//!
//! Export writes what the user sees, minus paging: every row that passes
//! the active filters, in sort order, through the visible columns only.
//! Cells are rendered through the same projection as the grid, so lookup
//! labels and custom renderers' text appear as displayed.

use std::io::Write;

use ledgergrid_core::logging::targets;

use crate::error::Result;
use crate::grid::Projection;
use crate::model::{Row, RowStore};

/// Options for CSV export.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    delimiter: u8,
    /// Whether a header row of column captions is written (default: true)
    has_headers: bool,
    /// Quote character (default: double quote)
    quote: u8,
    /// Whether to double quotes for escaping (default: true)
    double_quote: bool,
}

impl CsvOptions {
    /// Creates default CSV options.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            quote: b'"',
            double_quote: true,
        }
    }

    /// Sets the field delimiter.
    ///
    /// Common values:
    /// - `b','` - Comma (default, CSV)
    /// - `b'\t'` - Tab (TSV)
    /// - `b';'` - Semicolon (common in European locales)
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Omits the header row.
    pub fn no_headers(mut self) -> Self {
        self.has_headers = false;
        self
    }

    /// Sets whether the header row is written.
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Sets the quote character.
    pub fn quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Sets whether to use double quotes for escaping.
    pub fn double_quote(mut self, double_quote: bool) -> Self {
        self.double_quote = double_quote;
        self
    }

    fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote);
        builder
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the rows at `positions` of `store` as CSV.
///
/// Returns the number of data records written (the header is not counted).
/// With no exportable column nothing is written.
pub fn write_csv<R, W>(
    writer: W,
    projection: &Projection<R>,
    store: &RowStore<R>,
    positions: &[usize],
    options: &CsvOptions,
) -> Result<usize>
where
    R: Row,
    W: Write,
{
    let slots: Vec<usize> = projection
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| column.exportable)
        .map(|(slot, _)| slot)
        .collect();

    if slots.is_empty() {
        tracing::debug!(target: targets::EXPORT, "no visible columns, nothing exported");
        return Ok(0);
    }

    let mut csv_writer = options.writer_builder().from_writer(writer);

    if options.has_headers {
        let captions = slots.iter().map(|&slot| projection.columns()[slot].caption.as_str());
        csv_writer.write_record(captions)?;
    }

    let mut written = 0;
    for row in positions.iter().filter_map(|&position| store.row_at(position)) {
        let record: Vec<String> = slots
            .iter()
            .map(|&slot| projection.cell_text(slot, row))
            .collect();
        csv_writer.write_record(&record)?;
        written += 1;
    }
    csv_writer.flush()?;

    tracing::debug!(
        target: targets::EXPORT,
        rows = written,
        columns = slots.len(),
        "exported CSV"
    );
    Ok(written)
}
