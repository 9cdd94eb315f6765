//! Shared helpers for integration tests

use tracing_subscriber::EnvFilter;

/// Routes the library's `tracing` events to the test output.
///
/// Set `RUST_LOG=rust_fibonacci_heap=trace` to see consolidation and cascade
/// events. Safe to call from every test; only the first call installs.
#[allow(dead_code)]
pub fn enable_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
