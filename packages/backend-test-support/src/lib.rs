//! Helpers shared by the devconnect unit and integration tests.
//!
//! - [`logging`]: one captured subscriber per test process
//! - [`unique_helpers`]: ULID-suffixed names and emails
//! - [`error_body`]: assertions on the `{"msg"}` and `{"errors"}` shapes

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
