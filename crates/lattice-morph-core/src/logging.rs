//! Logging facilities for Lattice Morph.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output per subsystem
//! - A performance span guard for profiling frame work
//! - `morph_*!` convenience macros bound to the core target
//!
//! # Tracing Integration
//!
//! Lattice Morph uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_morph=debug,lattice_morph_core::frame=trace")
//!         .init();
//! }
//! ```

/// Span names used throughout Lattice Morph for tracing.
pub mod span_names {
    /// Per-frame composition span.
    pub const COMPOSE: &str = "lattice_morph::compose";
    /// Post-frame callback flush span.
    pub const FRAME_FLUSH: &str = "lattice_morph::frame_flush";
    /// Signal emission span.
    pub const SIGNAL: &str = "lattice_morph::signal";
    /// Geometry measurement span.
    pub const MEASURE: &str = "lattice_morph::measure";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "lattice_morph_core";
    /// Signal system target.
    pub const SIGNAL: &str = "lattice_morph_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "lattice_morph_core::property";
    /// Frame scheduler target.
    pub const FRAME: &str = "lattice_morph_core::frame";
    /// Deferred promise target.
    pub const DEFERRED: &str = "lattice_morph_core::deferred";
    /// Animation controller target.
    pub const ANIMATION: &str = "lattice_morph::animation";
    /// Closed-state host and registry target.
    pub const HOST: &str = "lattice_morph::host";
    /// Measurement protocol target.
    pub const MEASURE: &str = "lattice_morph::measure";
    /// Route state machine target.
    pub const ROUTE: &str = "lattice_morph::route";
    /// Paint layer target.
    pub const LAYER: &str = "lattice_morph::layer";
    /// Performance spans target.
    pub const PERF: &str = "lattice_morph::perf";
}

/// A performance tracing span guard.
///
/// Emits an info-level span on the perf target for the guard's lifetime.
///
/// ```ignore
/// let _span = PerfSpan::new("compose");
/// // ... work measured by the span
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
        let span = tracing::info_span!(target: "lattice_morph::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These wrap `tracing` macros with the core target pre-filled.
#[macro_export]
macro_rules! morph_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "lattice_morph_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! morph_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "lattice_morph_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! morph_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "lattice_morph_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! morph_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "lattice_morph_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! morph_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "lattice_morph_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _subscriber = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
        crate::morph_debug!(value = 1, "inside perf span");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::SIGNAL, targets::PROPERTY, targets::FRAME, targets::DEFERRED] {
            assert!(target.starts_with(targets::CORE));
        }
        assert!(span_names::COMPOSE.starts_with("lattice_morph::"));
    }
}
