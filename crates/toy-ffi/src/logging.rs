//! Internal event logging.

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `filter`.
///
/// An unparsable directive falls back to `off`. Does nothing if a global
/// subscriber is already installed.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .try_init();
}
