use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod decisions;
pub mod export;
pub mod health;
pub mod sessions;

/// Register every route.
///
/// Experimenter scopes (`/api/sessions`, `/api/export`) are wrapped in
/// `JwtExtract` here, so `main` and the integration tests share one wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    cfg.service(web::scope("/api/participants").configure(decisions::configure_routes));

    cfg.service(
        web::scope("/api/sessions")
            .wrap(JwtExtract)
            .configure(sessions::configure_routes),
    );

    cfg.service(
        web::scope("/api/export")
            .wrap(JwtExtract)
            .configure(export::configure_routes),
    );
}
