//! Security-relevant events, logged with a stable `event` field.

use tracing::{debug, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// Log a request refused by the auth middleware.
pub fn token_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    debug!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        path,
        "Request refused"
    );
}

/// Log a registration refused because the email is taken.
pub fn registration_conflict(email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_REGISTRATION_CONFLICT",
        %trace_id,
        email = %Redacted(email),
        "Registration with an existing email"
    );
}
