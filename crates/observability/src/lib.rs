//! Process-wide log setup for the storefront binaries and tests.

pub mod tracing;

/// Install the JSON log subscriber. Later calls are no-ops.
pub fn init() {
    tracing::init();
}
