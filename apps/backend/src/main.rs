use std::env;
use std::str::FromStr;

use actix_web::{web, App, HttpServer};
use db_infra::db::{DbKind, RuntimeEnv};
use decisions_backend::config::email_allowlist::EmailAllowlist;
use decisions_backend::config::{jwt_secret_from_env, ServerConfig};
use decisions_backend::infra::state::build_state;
use decisions_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use decisions_backend::routes;
use decisions_backend::state::security_config::SecurityConfig;
use decisions_backend::telemetry;
use tracing::{error, info, warn};

fn db_kind_from_env() -> Result<DbKind, String> {
    match env::var("DB_KIND") {
        Ok(raw) => DbKind::from_str(&raw).map_err(|e| e.to_string()),
        Err(_) => Ok(DbKind::Postgres),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment comes from the runtime (docker env_file, or a sourced .env locally).
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    let jwt = match jwt_secret_from_env() {
        Ok(secret) => secret,
        Err(e) => {
            error!(error = %e, "Missing JWT secret");
            std::process::exit(1);
        }
    };

    let db_kind = match db_kind_from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "Invalid DB_KIND");
            std::process::exit(1);
        }
    };

    let allowlist = EmailAllowlist::from_env();
    match &allowlist {
        Some(list) => info!(patterns = list.pattern_count(), "Experimenter email allowlist enabled"),
        None => warn!("ALLOWED_EMAILS is unset; experimenter login and export are disabled"),
    }

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(SecurityConfig::new(jwt.as_bytes()))
        .with_email_allowlist(allowlist)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, ?db_kind, "Starting decisions backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
