use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::export::build_export;
use crate::state::app_state::AppState;

/// Every session as nested JSON. Reads happen in one transaction so the
/// tree is a consistent snapshot.
async fn export_decisions(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sessions = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { build_export(txn).await })
    })
    .await?;

    info!(user_id = user.id, sessions = sessions.len(), "Decisions exported");
    Ok(HttpResponse::Ok().json(sessions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/decisions").route(web::get().to(export_decisions)));
}
