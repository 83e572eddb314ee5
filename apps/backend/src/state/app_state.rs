use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::email_allowlist::EmailAllowlist;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    /// Experimenter login restriction; `None` admits every email.
    pub email_allowlist: Option<EmailAllowlist>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            email_allowlist: None,
        }
    }

    /// State for routes that never touch the database (health probes, auth unit tests).
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            email_allowlist: None,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
