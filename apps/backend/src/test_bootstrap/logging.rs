//! Unit tests log through the same subscriber setup as the integration
//! suites, so `TEST_LOG=debug cargo test -p devconnect` works for both.

pub fn init() {
    backend_test_support::logging::init();
}
