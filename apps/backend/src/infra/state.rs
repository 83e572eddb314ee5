use db_infra::db::{DbKind, RuntimeEnv};

use crate::config::email_allowlist::EmailAllowlist;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the integration tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    email_allowlist: Option<EmailAllowlist>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            env: RuntimeEnv::Test,
            db_kind: None,
            email_allowlist: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_email_allowlist(mut self, allowlist: Option<EmailAllowlist>) -> Self {
        self.email_allowlist = allowlist;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mut state = match self.db_kind {
            Some(kind) => {
                let conn = bootstrap_db(self.env, kind).await?;
                AppState::new(conn, self.security_config)
            }
            None => AppState::new_without_db(self.security_config),
        };
        state.email_allowlist = self.email_allowlist;
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
