use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::config::email_allowlist::normalize_email;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self as users_repo, User};

/// First four characters then asterisks.
fn redact_sub(sub: &str) -> String {
    match sub.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &sub[..idx]),
        None => "*".repeat(sub.chars().count()),
    }
}

/// Find the experimenter for `email`, creating them on first login.
///
/// Idempotent for the same (email, google_sub). A known email arriving with
/// a different Google sub is a conflict.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: Option<&str>,
    google_sub: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "Email must be a valid address",
        ));
    }
    let google_sub = google_sub.trim();
    if google_sub.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidGoogleSub,
            "google_sub must not be empty",
        ));
    }

    match users_repo::find_by_email(conn, &email).await? {
        Some(existing) => {
            if existing.sub != google_sub {
                warn!(
                    user_id = existing.id,
                    email = %Redacted(&email),
                    incoming_sub = %redact_sub(google_sub),
                    existing_sub = %redact_sub(&existing.sub),
                    "Google sub mismatch detected"
                );
                return Err(AppError::conflict(
                    ErrorCode::GoogleSubMismatch,
                    "This email is already linked to a different Google account",
                ));
            }
            let user = users_repo::touch(conn, existing).await?;
            debug!(user_id = user.id, email = %Redacted(&email), "Repeat login");
            Ok(user)
        }
        None => {
            let username = derive_username(name, &email);
            let user = users_repo::create_user(conn, google_sub, &email, username).await?;
            info!(
                user_id = user.id,
                email = %Redacted(&email),
                google_sub = %redact_sub(google_sub),
                "First login, experimenter created"
            );
            Ok(user)
        }
    }
}

/// Display name, else the email's local part.
fn derive_username(name: Option<&str>, email: &str) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| email.split('@').next().filter(|l| !l.is_empty()))
        .map(str::to_string)
}
