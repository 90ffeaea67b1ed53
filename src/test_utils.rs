// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macro for float comparison,
//! which properly handles floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macro for convenient use in tests
pub use approx::assert_abs_diff_eq;

/// Installs a `tracing` subscriber writing to the test output.
///
/// Honours `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
