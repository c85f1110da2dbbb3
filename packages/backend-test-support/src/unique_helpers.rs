//! Collision-free test data.
//!
//! Suites share one in-process store per test or a long-lived Mongo
//! database, so names and emails carry a ULID suffix instead of fixed
//! literals.

use ulid::Ulid;

/// `"{prefix}-{ulid}"`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("post");
/// assert!(a.starts_with("post-"));
/// assert_ne!(a, unique_str("post"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// A lower-case email under the reserved `.test` TLD, so it already matches
/// what the backend stores after normalization.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("Jane");
/// assert!(email.starts_with("jane-"));
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    unique_str(prefix).to_lowercase() + "@example.test"
}
