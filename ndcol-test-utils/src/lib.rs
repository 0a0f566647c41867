//! Helpers shared by ndcol test binaries.

use std::sync::Once;

use tracing_subscriber::filter::EnvFilter;

/// Crate-specific override, checked before `RUST_LOG`.
pub const NDCOL_LOG_ENV: &str = "NDCOL_TEST_LOG";

/// Filter used when neither variable is set: engine and column traffic at
/// `debug`, everything else at `warn`.
pub const DEFAULT_TEST_DIRECTIVES: &str = "warn,ndcol_engine=debug,ndcol_column=debug";

static INIT: Once = Once::new();

/// Directives to apply, given the values of `NDCOL_TEST_LOG` and `RUST_LOG`.
pub fn log_directives(ndcol_log: Option<&str>, rust_log: Option<&str>) -> String {
    [ndcol_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|d| !d.is_empty())
        .unwrap_or(DEFAULT_TEST_DIRECTIVES)
        .to_string()
}

/// Install a test-writer subscriber once per test binary.
///
/// Unparseable directives fall back to [`DEFAULT_TEST_DIRECTIVES`].
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        let ndcol_log = std::env::var(NDCOL_LOG_ENV).ok();
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let directives = log_directives(ndcol_log.as_deref(), rust_log.as_deref());
        let filter = EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_DIRECTIVES));
        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}
