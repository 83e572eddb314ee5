use db_infra::db::{DbKind, RuntimeEnv};
use decisions_backend::config::email_allowlist::EmailAllowlist;
use decisions_backend::infra::state::build_state;
use decisions_backend::state::app_state::AppState;
use decisions_backend::state::security_config::SecurityConfig;

pub const TEST_JWT_SECRET: &str = "decisions-test-secret-not-for-production";

/// Domains the factories and `unique_email` hand out.
pub const TEST_ALLOWED_EMAILS: &str = "*@lab.example.org, *@example.test";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}

/// Fresh in-memory database, migrated, one per call. Experimenter emails
/// under the test domains are allowed.
pub async fn build_test_state() -> AppState {
    build_test_state_with_allowlist(TEST_ALLOWED_EMAILS).await
}

/// No `ALLOWED_EMAILS` at all.
pub async fn build_test_state_without_allowlist() -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .build()
        .await
        .expect("in-memory state should build")
}

/// Like [`build_test_state`] with `ALLOWED_EMAILS`-style patterns.
pub async fn build_test_state_with_allowlist(patterns: &str) -> AppState {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .with_email_allowlist(EmailAllowlist::parse(patterns))
        .build()
        .await
        .expect("in-memory state should build")
}
