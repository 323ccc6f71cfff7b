//! Core systems for ledgergrid.
//!
//! This crate provides the foundational pieces the grid adapter is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification ([`Signal`])
//! - **Property System**: Values with change detection ([`Property`]) and
//!   controlled-prop change tracking ([`PropWatch`])
//! - **Logging**: `tracing` target names for filtering ([`logging::targets`])
//!
//! # Example
//!
//! ```
//! use ledgergrid_core::{Property, Signal};
//!
//! struct Pager {
//!     page_index: Property<usize>,
//!     page_index_changed: Signal<usize>,
//! }
//!
//! impl Pager {
//!     fn go_to(&self, index: usize) {
//!         if self.page_index.set(index) {
//!             self.page_index_changed.emit(index);
//!         }
//!     }
//! }
//!
//! let pager = Pager {
//!     page_index: Property::new(0),
//!     page_index_changed: Signal::new(),
//! };
//! pager.page_index_changed.connect(|index| println!("now on page {}", index));
//! pager.go_to(3);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use property::{PropWatch, Property};
pub use signal::{ConnectionId, Signal};
