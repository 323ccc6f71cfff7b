//! Core traits for row records.

use std::fmt::Debug;
use std::hash::Hash;

use super::value::CellValue;

/// A record displayed as one grid row.
///
/// Rows are opaque to the grid apart from two things: a stable unique key
/// and named field access. Selection, lookups and sorting all go through
/// these, never through the row's reference identity, so replacing the row
/// array with fresh objects carrying the same keys keeps selection intact.
///
/// All rows in one grid share the same shape: every field referenced by the
/// active column set must be answerable (a missing field reads as
/// [`CellValue::None`]).
///
/// # Example
///
/// ```
/// use ledgergrid::model::{CellValue, Row};
///
/// #[derive(Clone)]
/// struct Loan {
///     id: String,
///     outstanding_principal_balance: f64,
/// }
///
/// impl Row for Loan {
///     type Key = String;
///
///     fn key(&self) -> String {
///         self.id.clone()
///     }
///
///     fn field(&self, name: &str) -> CellValue {
///         match name {
///             "id" => CellValue::from(&self.id),
///             "outstanding_principal_balance" => {
///                 CellValue::from(self.outstanding_principal_balance)
///             }
///             _ => CellValue::None,
///         }
///     }
/// }
/// ```
pub trait Row: Clone + Send + Sync + 'static {
    /// The row key type.
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the row's unique key.
    fn key(&self) -> Self::Key;

    /// Returns the raw value stored under `name`.
    ///
    /// Unknown fields return `CellValue::None`.
    fn field(&self, name: &str) -> CellValue;
}
