use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::sessions::{Participant, Session};
use crate::services::sessions::{self as sessions_service, CreateSession, CreatedSession};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub label: String,
    pub num_participants: i32,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub is_demo: bool,
    pub seed: Option<i64>,
}

impl From<CreateSessionRequest> for CreateSession {
    fn from(r: CreateSessionRequest) -> Self {
        Self {
            label: r.label,
            num_participants: r.num_participants,
            experimenter_name: r.experimenter_name,
            comment: r.comment,
            is_demo: r.is_demo,
            seed: r.seed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantSummary {
    pub id_in_session: i32,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub code: String,
    pub label: String,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    pub num_participants: i32,
    pub time_started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<ParticipantSummary>>,
}

impl SessionSummary {
    fn new(session: Session, participants: Option<Vec<Participant>>) -> Self {
        Self {
            code: session.code,
            label: session.label,
            experimenter_name: session.experimenter_name,
            comment: session.comment,
            is_demo: session.is_demo,
            num_participants: session.num_participants,
            time_started: session.time_started.and_then(|t| t.format(&Rfc3339).ok()),
            participants: participants.map(|ps| {
                ps.into_iter()
                    .map(|p| ParticipantSummary {
                        id_in_session: p.id_in_session,
                        code: p.code,
                    })
                    .collect()
            }),
        }
    }
}

impl From<CreatedSession> for SessionSummary {
    fn from(created: CreatedSession) -> Self {
        Self::new(created.session, Some(created.participants))
    }
}

/// Create a session with every round set up; the summary lists the
/// participant codes to hand out.
async fn create_session(
    http_req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateSessionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = CreateSession::from(body.into_inner());

    let created = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { sessions_service::create_session(txn, input).await })
    })
    .await?;

    info!(
        user_id = user.id,
        session_code = %created.session.code,
        "Session created by experimenter"
    );

    Ok(HttpResponse::Created().json(SessionSummary::from(created)))
}

async fn list_sessions(
    http_req: HttpRequest,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sessions = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { sessions_service::list_sessions(txn).await })
    })
    .await?;

    let summaries: Vec<SessionSummary> = sessions
        .into_iter()
        .map(|s| SessionSummary::new(s, None))
        .collect();
    Ok(HttpResponse::Ok().json(summaries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_session))
            .route(web::get().to(list_sessions)),
    );
}
