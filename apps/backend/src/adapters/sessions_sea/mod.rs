//! SeaORM adapter for sessions and their participants.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{participants, sessions};

pub mod dto;

pub use dto::{ParticipantCreate, SessionCreate};

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    sessions::ActiveModel {
        id: NotSet,
        code: Set(dto.code),
        label: Set(dto.label),
        experimenter_name: Set(dto.experimenter_name),
        comment: Set(dto.comment),
        is_demo: Set(dto.is_demo),
        num_participants: Set(dto.num_participants),
        rng_seed: Set(dto.rng_seed),
        time_started: Set(Some(now)),
        created_at: Set(now),
    }
    .insert(conn)
    .await
}

/// All sessions in primary key order. Label ordering is applied by the
/// repo so it does not depend on the database collation.
pub async fn list_sessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .order_by_asc(sessions::Column::Id)
        .all(conn)
        .await
}

/// Which of `codes` already belong to a session.
pub async fn session_codes_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    codes: &[String],
) -> Result<Vec<String>, sea_orm::DbErr> {
    sessions::Entity::find()
        .select_only()
        .column(sessions::Column::Code)
        .filter(sessions::Column::Code.is_in(codes.iter().cloned()))
        .into_tuple::<String>()
        .all(conn)
        .await
}

/// Which of `codes` already belong to a participant.
pub async fn participant_codes_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    codes: &[String],
) -> Result<Vec<String>, sea_orm::DbErr> {
    participants::Entity::find()
        .select_only()
        .column(participants::Column::Code)
        .filter(participants::Column::Code.is_in(codes.iter().cloned()))
        .into_tuple::<String>()
        .all(conn)
        .await
}

pub async fn create_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<participants::Model, sea_orm::DbErr> {
    participants::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        id_in_session: Set(dto.id_in_session),
        code: Set(dto.code),
        label: Set(None),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn find_participant_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .filter(participants::Column::Code.eq(code))
        .one(conn)
        .await
}

/// Every participant, ordered by session then id_in_session.
pub async fn list_participants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find()
        .order_by_asc(participants::Column::SessionId)
        .order_by_asc(participants::Column::IdInSession)
        .all(conn)
        .await
}
