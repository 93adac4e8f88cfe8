//! Tracing setup for the `luckydraw` binary.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn,luckydraw_engine=info,luckydraw_cli=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a formatting subscriber on stderr, filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
