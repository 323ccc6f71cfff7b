//! Keyed row storage.
//!
//! `DataSource` presents a caller-supplied row array as a keyed, queryable
//! [`RowStore`]. The store is rebuilt only when the caller hands over a
//! different `Arc`; passing the same `Arc` again is free.

use std::collections::HashMap;
use std::sync::Arc;

use ledgergrid_core::logging::targets;

use super::traits::Row;
use crate::error::{GridError, Result, ValidationPolicy};

/// An immutable, keyed snapshot of a row array.
pub struct RowStore<R: Row> {
    rows: Arc<Vec<R>>,
    positions: HashMap<R::Key, usize>,
    duplicates: Vec<R::Key>,
}

impl<R: Row> RowStore<R> {
    /// Creates an empty store.
    pub fn empty() -> Self {
        Self {
            rows: Arc::new(Vec::new()),
            positions: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Builds a store over `rows`, validating key uniqueness.
    ///
    /// Under [`ValidationPolicy::Lenient`] the first row carrying a key owns
    /// it for lookups and selection; later duplicates are still listed.
    pub fn build(rows: Arc<Vec<R>>, policy: ValidationPolicy) -> Result<Self> {
        let mut positions = HashMap::with_capacity(rows.len());
        let mut duplicates = Vec::new();

        for (position, row) in rows.iter().enumerate() {
            let key = row.key();
            if positions.contains_key(&key) {
                policy.check(GridError::DuplicateKey {
                    key: format!("{key:?}"),
                })?;
                duplicates.push(key);
            } else {
                positions.insert(key, position);
            }
        }

        Ok(Self {
            rows,
            positions,
            duplicates,
        })
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rows in source order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Returns the shared row array the store was built from.
    pub fn shared_rows(&self) -> &Arc<Vec<R>> {
        &self.rows
    }

    /// Returns the row at a source position.
    pub fn row_at(&self, position: usize) -> Option<&R> {
        self.rows.get(position)
    }

    /// Returns the row owning `key`.
    pub fn row(&self, key: &R::Key) -> Option<&R> {
        self.position(key).and_then(|p| self.rows.get(p))
    }

    /// Returns the source position of the row owning `key`.
    pub fn position(&self, key: &R::Key) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Returns `true` if a row with `key` is loaded.
    pub fn contains(&self, key: &R::Key) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = R::Key> + '_ {
        self.rows.iter().map(Row::key)
    }

    /// Keys that appeared more than once (only populated under the lenient policy).
    pub fn duplicate_keys(&self) -> &[R::Key] {
        &self.duplicates
    }
}

impl<R: Row> std::fmt::Debug for RowStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStore")
            .field("len", &self.rows.len())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

/// Memoizing wrapper that rebuilds its [`RowStore`] on row identity change.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ledgergrid::model::{CellValue, DataSource, Row};
/// use ledgergrid::ValidationPolicy;
///
/// #[derive(Clone)]
/// struct Vendor { id: u32 }
///
/// impl Row for Vendor {
///     type Key = u32;
///     fn key(&self) -> u32 { self.id }
///     fn field(&self, _name: &str) -> CellValue { CellValue::None }
/// }
///
/// let rows = Arc::new(vec![Vendor { id: 1 }, Vendor { id: 2 }]);
/// let mut source = DataSource::new(ValidationPolicy::Strict);
///
/// assert!(source.sync(&rows).unwrap());
/// assert!(!source.sync(&rows).unwrap()); // same Arc, nothing rebuilt
/// assert_eq!(source.store().len(), 2);
/// ```
pub struct DataSource<R: Row> {
    store: Arc<RowStore<R>>,
    generation: u64,
    policy: ValidationPolicy,
}

impl<R: Row> DataSource<R> {
    /// Creates an empty data source.
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            store: Arc::new(RowStore::empty()),
            generation: 0,
            policy,
        }
    }

    /// Synchronizes with the caller's row array.
    ///
    /// Returns `true` if the store was rebuilt. On a strict-policy error the
    /// previous store is kept.
    pub fn sync(&mut self, rows: &Arc<Vec<R>>) -> Result<bool> {
        if self.generation > 0 && Arc::ptr_eq(self.store.shared_rows(), rows) {
            return Ok(false);
        }

        let store = RowStore::build(Arc::clone(rows), self.policy)?;
        self.store = Arc::new(store);
        self.generation += 1;

        tracing::debug!(
            target: targets::DATA_SOURCE,
            rows = self.store.len(),
            generation = self.generation,
            "rebuilt row store"
        );
        Ok(true)
    }

    /// Returns the current store.
    pub fn store(&self) -> &Arc<RowStore<R>> {
        &self.store
    }

    /// Number of rebuilds so far; changes exactly when the store identity changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the validation policy.
    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }
}

impl<R: Row> std::fmt::Debug for DataSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSource")
            .field("store", &self.store)
            .field("generation", &self.generation)
            .field("policy", &self.policy)
            .finish()
    }
}
