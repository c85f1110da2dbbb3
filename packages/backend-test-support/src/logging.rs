//! Captured log output for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

const QUIET: &str = "warn,devconnect=warn";

static INSTALLED: OnceCell<()> = OnceCell::new();

fn filter_from_env() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|key| std::env::var(key).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(QUIET))
}

/// Safe to call from every test; only the first call installs anything.
///
/// `TEST_LOG` wins over `RUST_LOG`. Lines go through the libtest writer so
/// they only show up for failing tests.
pub fn init() {
    INSTALLED.get_or_init(|| {
        // the backend's unit tests may have installed their own subscriber
        let _ = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time()
            .compact()
            .try_init();
    });
}
