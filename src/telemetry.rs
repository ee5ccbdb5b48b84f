//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "storefront=info";

/// Initializes the global tracing subscriber.
///
/// Verbosity follows `RUST_LOG`, e.g. `RUST_LOG=storefront=debug` to see
/// every catalog request.
pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
