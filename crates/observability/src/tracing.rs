use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info,storefront_api=debug,storefront_auth=debug";

/// Resolve the log filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// JSON lines on stdout, one object per event, with timestamps and span context.
pub fn init() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .json()
        .with_current_span(true)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        ::tracing::debug!(default_filter = DEFAULT_FILTER, "log subscriber installed");
    }
}
