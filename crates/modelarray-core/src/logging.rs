//! Logging facilities for ModelArray.
//!
//! ModelArray uses the `tracing` crate for instrumentation. Nothing is logged
//! unless the application installs a subscriber:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Collection mutations log a `debug!` summary under
//! [`targets::COLLECTION`], and every signal emission logs at `trace` level
//! under [`targets::SIGNAL`]. Filter on those targets to follow the change
//! stream of a view-model, e.g. `RUST_LOG=modelarray::collection=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "modelarray_core::signal";
    /// Collection engine target.
    pub const COLLECTION: &str = "modelarray::collection";
    /// Performance measurement target, see [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "modelarray::perf";
}

/// A guard for timing an operation.
///
/// When created, opens an `info`-level span under [`targets::PERF`], tagged
/// with the operation name. The span closes when the guard is dropped, so
/// subscribers that record span timings (e.g. `tracing-subscriber` with
/// `FmtSpan::CLOSE`) report the duration of the guarded block.
///
/// # Example
///
/// ```
/// use modelarray_core::PerfSpan;
///
/// fn reconcile() {
///     let _span = PerfSpan::new("reconcile");
///     // ... expensive work ...
/// } // Span ends here
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        assert!(targets::SIGNAL.starts_with("modelarray_core::"));
        assert!(targets::COLLECTION.starts_with("modelarray::"));
        assert!(targets::PERF.starts_with("modelarray::"));
    }

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic without a subscriber
        let _span = PerfSpan::new("test_operation");
    }
}
