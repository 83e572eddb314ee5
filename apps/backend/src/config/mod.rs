//! Process configuration read from the environment.
//!
//! Database settings live in `db_infra::config`; this module holds the
//! backend-only knobs.

pub mod email_allowlist;

use std::env;

use crate::error::AppError;

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `BACKEND_HOST` (default `0.0.0.0`) and `BACKEND_PORT` (default `3001`).
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT is not a port: {raw}")))?,
            Err(_) => 3001,
        };
        Ok(Self { host, port })
    }
}

/// `BACKEND_JWT_SECRET`, required.
pub fn jwt_secret_from_env() -> Result<String, AppError> {
    match env::var("BACKEND_JWT_SECRET") {
        Ok(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::config("BACKEND_JWT_SECRET must be set")),
    }
}
