//! Shared test setup: one global tracing subscriber for all tests

use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install a test-writer subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `checktree=debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("checktree=debug"));

        let result = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();

        match result {
            Ok(()) => debug!("test logging initialized"),
            Err(e) => eprintln!("tracing subscriber already set: {e}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_initializing_then_is_idempotent() {
        init_test_setup();
        init_test_setup();
    }
}
