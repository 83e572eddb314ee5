use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::security;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub google_sub: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Experimenter login after the OAuth round trip: find or create the user
/// and hand back an access token.
async fn login(
    http_req: HttpRequest,
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest {
        email,
        name,
        google_sub,
    } = body.into_inner();

    // No allowlist means nobody may log in.
    match &app_state.email_allowlist {
        Some(allowlist) if allowlist.is_allowed(&email) => {}
        Some(_) => {
            security::login_failed("email_not_allowed", Some(&email));
            return Err(AppError::email_not_allowed());
        }
        None => {
            security::login_failed("allowlist_unset", Some(&email));
            return Err(AppError::email_not_allowed());
        }
    }

    let user = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { ensure_user(txn, &email, name.as_deref(), &google_sub).await })
    })
    .await?;

    let token = mint_access_token(&user.sub, &user.email, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
