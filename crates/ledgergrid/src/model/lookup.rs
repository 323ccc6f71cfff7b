//! Value-to-label lookup tables.
//!
//! A lookup column maps a raw stored value (a status code, a product type)
//! to a short human label. Tables are injected through a [`LookupCatalog`]
//! rather than read from globals, and never touch row data.

use std::collections::HashMap;
use std::sync::Arc;

use super::value::CellValue;

/// One `{value, label}` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupEntry {
    /// The raw stored value.
    pub value: CellValue,
    /// The label shown in place of the value.
    pub label: String,
}

/// A small enumerated value-to-label list.
///
/// # Example
///
/// ```
/// use ledgergrid::model::{CellValue, LookupTable};
///
/// let statuses = LookupTable::from_pairs([
///     ("approved", "Approved"),
///     ("drafted", "Drafted"),
/// ]);
///
/// assert_eq!(statuses.label_for(&CellValue::from("approved")), Some("Approved"));
/// assert_eq!(statuses.label_for(&CellValue::from("rejected")), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    entries: Vec<LookupEntry>,
}

impl LookupTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from `(value, label)` pairs, keeping their order.
    pub fn from_pairs<V, L, I>(pairs: I) -> Self
    where
        V: Into<CellValue>,
        L: Into<String>,
        I: IntoIterator<Item = (V, L)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(value, label)| LookupEntry {
                    value: value.into(),
                    label: label.into(),
                })
                .collect(),
        }
    }

    /// Appends an entry.
    pub fn with_entry(mut self, value: impl Into<CellValue>, label: impl Into<String>) -> Self {
        self.entries.push(LookupEntry {
            value: value.into(),
            label: label.into(),
        });
        self
    }

    /// Returns the entries in declaration order.
    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Returns the label for a raw value. The first matching entry wins.
    pub fn label_for(&self, value: &CellValue) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.value == value)
            .map(|entry| entry.label.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named lookup tables available to a grid's columns.
#[derive(Debug, Clone, Default)]
pub struct LookupCatalog {
    tables: HashMap<String, Arc<LookupTable>>,
}

impl LookupCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under `name`, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, table: LookupTable) {
        self.tables.insert(name.into(), Arc::new(table));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_table(mut self, name: impl Into<String>, table: LookupTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Returns the table registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<LookupTable>> {
        self.tables.get(name)
    }

    /// Returns `true` if a table is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Where a column gets its lookup table from.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupSource {
    /// A table registered in the grid's [`LookupCatalog`].
    Named(String),
    /// A table carried by the column itself.
    Inline(Arc<LookupTable>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_types() -> LookupTable {
        LookupTable::new()
            .with_entry("inventory_financing", "Inventory Financing")
            .with_entry("invoice_financing", "Invoice Financing")
            .with_entry("line_of_credit", "Line of Credit")
    }

    #[test]
    fn test_label_for_known_and_unknown() {
        let table = product_types();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.label_for(&CellValue::from("line_of_credit")),
            Some("Line of Credit")
        );
        assert_eq!(table.label_for(&CellValue::from("purchase_money")), None);
        assert_eq!(table.label_for(&CellValue::None), None);
    }

    #[test]
    fn test_numeric_values() {
        let tiers = LookupTable::from_pairs([(15i64, "15 days"), (30, "30 days"), (60, "60 days")]);
        assert_eq!(tiers.label_for(&CellValue::Int(30)), Some("30 days"));
        // Values are matched exactly, not numerically widened.
        assert_eq!(tiers.label_for(&CellValue::Float(30.0)), None);
    }

    #[test]
    fn test_catalog_injection() {
        let catalog = LookupCatalog::new().with_table("product_type", product_types());
        assert!(catalog.contains("product_type"));
        assert!(!catalog.contains("debt_facility_status"));
        assert_eq!(catalog.get("product_type").map(|t| t.len()), Some(3));
    }
}
