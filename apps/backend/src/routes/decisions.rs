//! Participant decision page.
//!
//! Participants are identified by their code in the path; no login.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{DecisionSubmission, ParticipantRound};
use crate::services::decisions as decisions_service;
use crate::state::app_state::AppState;

async fn render(
    http_req: HttpRequest,
    target: ParticipantRound,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ParticipantRound { code, round_number } = target;

    let page = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { decisions_service::render_page(txn, &code, round_number).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// All answers are written in one transaction or none are.
async fn submit(
    http_req: HttpRequest,
    target: ParticipantRound,
    submission: DecisionSubmission,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ParticipantRound { code, round_number } = target;
    let submitted = submission.into_inner();

    let page = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            decisions_service::submit_form(txn, &code, round_number, submitted).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(page))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{code}/rounds/{round}/decisions")
            .route(web::get().to(render))
            .route(web::post().to(submit)),
    );
}
