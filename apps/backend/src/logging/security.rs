use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Experimenter login rejected (allowlist or sub mismatch).
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

/// Request to an experimenter-only route without usable credentials.
pub fn access_denied(path: &str, reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        path,
        reason,
        "Protected route rejected"
    );
}
