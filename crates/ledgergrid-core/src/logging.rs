//! Logging facilities for ledgergrid.
//!
//! ledgergrid uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("ledgergrid=debug,ledgergrid_core=warn")
//!     .init();
//! ```
//!
//! Precondition violations tolerated under the lenient validation policy and
//! inert configurations are reported at `warn`; rebuilds and reconciliations
//! at `debug`; signal emission at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "ledgergrid_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "ledgergrid_core::signal";
    /// Data source wrapper target.
    pub const DATA_SOURCE: &str = "ledgergrid::data_source";
    /// View state controller target (pagination, sorting, filtering, selection).
    pub const VIEW_STATE: &str = "ledgergrid::view_state";
    /// Column projection target.
    pub const PROJECTION: &str = "ledgergrid::projection";
    /// Grid render pass target.
    pub const GRID: &str = "ledgergrid::grid";
    /// Export target.
    pub const EXPORT: &str = "ledgergrid::export";
    /// Configuration loading target.
    pub const CONFIG: &str = "ledgergrid::config";
}
