//! Task-local trace id for the request being served.
//!
//! `RequestTrace` runs the whole downstream pipeline inside [`with_trace_id`],
//! so error rendering and logging anywhere below it can read the id without
//! threading the request through.

use std::fmt;

use tokio::task_local;
use uuid::Uuid;

const MAX_INBOUND_LEN: usize = 64;

/// Per-request id, stored in request extensions by `RequestTrace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a caller-supplied id if it is short and header-safe.
    pub fn from_inbound(value: &str) -> Option<Self> {
        let value = value.trim();
        let ok = !value.is_empty()
            && value.len() <= MAX_INBOUND_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        ok.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` visible through [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_id_outside_context() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn test_trace_id_scoped_and_restored() {
        let outer = with_trace_id("outer-1".to_string(), async {
            assert_eq!(trace_id(), "outer-1");

            let inner = with_trace_id("inner-2".to_string(), async { trace_id() }).await;
            assert_eq!(inner, "inner-2");

            trace_id()
        })
        .await;

        assert_eq!(outer, "outer-1");
        assert_eq!(trace_id(), "unknown");
    }

    #[test]
    fn test_inbound_ids_are_filtered() {
        assert_eq!(
            TraceId::from_inbound(" abc-123_x ").map(|t| t.to_string()),
            Some("abc-123_x".to_string())
        );
        assert!(TraceId::from_inbound("").is_none());
        assert!(TraceId::from_inbound("has space").is_none());
        assert!(TraceId::from_inbound("line\nbreak").is_none());
        assert!(TraceId::from_inbound(&"a".repeat(65)).is_none());
        assert_ne!(TraceId::generate(), TraceId::generate());
    }
}
