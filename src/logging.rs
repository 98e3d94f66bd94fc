// ==========================================
// Logging initialization
// ==========================================
// tracing + tracing-subscriber; level comes from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging system for a host application.
///
/// Respects `RUST_LOG` (e.g. `RUST_LOG=heat_timeline=debug`), defaulting
/// to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// Initialize logging inside tests. Uses the test writer so pipeline
/// events interleave with the harness output, and ignores repeat calls
/// from other tests in the same binary.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("heat_timeline=debug"))
        .with_test_writer()
        .try_init();
}
