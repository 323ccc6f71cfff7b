//! Reactive values for ledgergrid.
//!
//! - **Property<T>**: a value with change detection; the owner emits its
//!   notification signal when `set` reports a change.
//! - **PropWatch<T>**: remembers the last value seen for a caller-owned
//!   ("controlled") prop so reconciliation runs only when the prop actually
//!   changed between renders.
//!
//! # Example
//!
//! ```
//! use ledgergrid_core::{Property, PropWatch, Signal};
//!
//! let page_size = Property::new(50usize);
//! let page_changed = Signal::<usize>::new();
//!
//! if page_size.set(20) {
//!     page_changed.emit(20);
//! }
//!
//! let mut watch = PropWatch::new();
//! assert!(watch.observe(&3usize));
//! assert!(!watch.observe(&3usize));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. When `set()` is
/// called, it compares the new value with the current one and returns whether
/// the value actually changed.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// Change detector for a caller-owned prop.
///
/// Mirrors the dependency-list semantics of a render effect: `observe`
/// returns `true` the first time a value is seen and whenever it differs
/// from the previous observation. Re-observing an equal value is a no-op.
#[derive(Debug, Clone)]
pub struct PropWatch<T> {
    last: Option<T>,
}

impl<T> Default for PropWatch<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Clone + PartialEq> PropWatch<T> {
    /// Creates a watch that has not observed anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value`, returning `true` if it differs from the last one seen.
    pub fn observe(&mut self, value: &T) -> bool {
        match &self.last {
            Some(last) if last == value => false,
            _ => {
                self.last = Some(value.clone());
                true
            }
        }
    }

    /// The last observed value.
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(10);

        assert!(!prop.set(10));
        assert_eq!(prop.get(), 10);

        assert!(prop.set(20));
        assert_eq!(prop.get(), 20);
    }

    #[test]
    fn test_property_shared_between_threads() {
        let prop = Arc::new(Property::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let prop = prop.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        prop.set(i);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(prop.get(), 49);
    }

    #[test]
    fn test_prop_watch_first_observation_is_change() {
        let mut watch = PropWatch::new();
        assert!(watch.observe(&vec![1, 2]));
        assert!(!watch.observe(&vec![1, 2]));
        assert!(watch.observe(&vec![2, 1]));
        assert_eq!(watch.last(), Some(&vec![2, 1]));
    }
}
