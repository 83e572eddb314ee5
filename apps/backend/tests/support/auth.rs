//! Bearer tokens for tests.

use std::time::{Duration, SystemTime};

use decisions_backend::auth::jwt::mint_access_token;
use decisions_backend::state::security_config::SecurityConfig;

pub fn bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let token = mint_access_token(sub, email, SystemTime::now(), sec).expect("mint token");
    format!("Bearer {token}")
}

/// Issued two hours ago, so already past its TTL.
pub fn expired_bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now() - Duration::from_secs(2 * 60 * 60);
    let token = mint_access_token(sub, email, issued, sec).expect("mint token");
    format!("Bearer {token}")
}
