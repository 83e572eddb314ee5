//! Session and participant repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::sessions_sea as sessions_adapter;
use crate::entities::{participants, sessions};
use crate::errors::domain::DomainError;

/// Session domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    pub num_participants: i32,
    pub rng_seed: i64,
    pub time_started: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

/// Participant domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub session_id: i64,
    pub id_in_session: i32,
    pub code: String,
    pub label: Option<String>,
}

/// Fields an experimenter supplies when creating a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub code: String,
    pub label: String,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    pub num_participants: i32,
    pub rng_seed: i64,
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewSession,
) -> Result<Session, DomainError> {
    let dto = sessions_adapter::SessionCreate {
        code: new.code,
        label: new.label,
        experimenter_name: new.experimenter_name,
        comment: new.comment,
        is_demo: new.is_demo,
        num_participants: new.num_participants,
        rng_seed: new.rng_seed,
    };
    Ok(sessions_adapter::create_session(conn, dto).await?.into())
}

/// Sessions ordered by label, ties by id.
pub async fn list_sessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Session>, DomainError> {
    let rows = sessions_adapter::list_sessions(conn).await?;
    let mut sessions: Vec<Session> = rows.into_iter().map(Session::from).collect();
    sort_by_label(&mut sessions);
    Ok(sessions)
}

/// Byte-wise label order, the same on every database engine.
pub fn sort_by_label(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
}

pub async fn session_codes_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    codes: &[String],
) -> Result<Vec<String>, DomainError> {
    Ok(sessions_adapter::session_codes_in_use(conn, codes).await?)
}

pub async fn participant_codes_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    codes: &[String],
) -> Result<Vec<String>, DomainError> {
    Ok(sessions_adapter::participant_codes_in_use(conn, codes).await?)
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    id_in_session: i32,
    code: String,
) -> Result<Participant, DomainError> {
    let dto = sessions_adapter::ParticipantCreate {
        session_id,
        id_in_session,
        code,
    };
    Ok(sessions_adapter::create_participant(conn, dto).await?.into())
}

pub async fn find_participant_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<Participant>, DomainError> {
    let row = sessions_adapter::find_participant_by_code(conn, code).await?;
    Ok(row.map(Participant::from))
}

pub async fn list_participants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Participant>, DomainError> {
    let rows = sessions_adapter::list_participants(conn).await?;
    Ok(rows.into_iter().map(Participant::from).collect())
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            label: model.label,
            experimenter_name: model.experimenter_name,
            comment: model.comment,
            is_demo: model.is_demo,
            num_participants: model.num_participants,
            rng_seed: model.rng_seed,
            time_started: model.time_started,
            created_at: model.created_at,
        }
    }
}

impl From<participants::Model> for Participant {
    fn from(model: participants::Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            id_in_session: model.id_in_session,
            code: model.code,
            label: model.label,
        }
    }
}
