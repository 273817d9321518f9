//! Logging setup for the binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is a
/// no-op for the second call.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
