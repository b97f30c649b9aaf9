//! Tracing/logging setup shared by idcard binaries.

/// Initialize process-wide tracing; `default_filter` applies when `RUST_LOG`
/// is unset.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with_default(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
