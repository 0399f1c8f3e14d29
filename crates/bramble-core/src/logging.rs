use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,bramble_ui=debug";

/// Install the global fmt subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// Install the global fmt subscriber with an explicit fallback filter.
///
/// `RUST_LOG` still takes precedence when it is set.
pub fn init_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
