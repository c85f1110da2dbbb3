pub mod app_builder;
pub mod auth;

// Suites import helpers from their modules; only the app entry point is
// re-exported, since every suite builds an app.
pub use app_builder::create_test_app;
