//! The controlled grid and its view state.
//!
//! - `Grid`: the consolidated controlled grid (`render` + user operations)
//! - `ViewStateController`: pagination, sorting, filtering and selection
//! - `Projection`: column descriptors mapped to widget columns
//! - `GridWidget`: the seam every imperative view call goes through, with
//!   `HeadlessGrid` as a recording implementation
//! - `GridFrame`: the output of one render pass
//!
//! # Render pass
//!
//! ```text
//! GridProps ──> DataSource::sync ──> Projection ──> reconcile page index
//!                                                        │
//!   GridFrame <── page slice <── filter + sort <─────────┘
//!       │
//!       └── changed state ──> GridWidget (columns, page, filters, selection)
//! ```

mod adapter;
mod controller;
mod filter;
mod frame;
mod pager;
mod projection;
mod selection;
mod sort;
mod widget;

pub use adapter::{Grid, GridProps};
pub use controller::{GridSignals, ViewStateController};
pub use filter::{ColumnFilter, FilterCondition, FilterState};
pub use frame::{GridFrame, PageInfo, PagerView, RenderedRow};
pub use pager::Pager;
pub use projection::{ProjectedColumn, Projection};
pub use selection::{KeySelection, SelectAllMode, SelectionMode, SelectionSync};
pub use sort::{SortDirection, SortOrder, SortState, sort_positions};
pub use widget::{GridWidget, HeadlessGrid, WidgetCalls, WidgetInstanceId};
