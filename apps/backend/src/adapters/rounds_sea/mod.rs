//! SeaORM adapter for per-round structure: subsessions, groups and players.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{groups, players, subsessions};

pub mod dto;

pub use dto::PlayerCreate;

pub async fn create_subsession<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    round_number: i32,
) -> Result<subsessions::Model, sea_orm::DbErr> {
    subsessions::ActiveModel {
        id: NotSet,
        session_id: Set(session_id),
        round_number: Set(round_number),
    }
    .insert(conn)
    .await
}

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subsession_id: i64,
    id_in_subsession: i32,
) -> Result<groups::Model, sea_orm::DbErr> {
    groups::ActiveModel {
        id: NotSet,
        subsession_id: Set(subsession_id),
        id_in_subsession: Set(id_in_subsession),
    }
    .insert(conn)
    .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    players::ActiveModel {
        id: NotSet,
        subsession_id: Set(dto.subsession_id),
        group_id: Set(dto.group_id),
        participant_id: Set(dto.participant_id),
        id_in_group: Set(dto.id_in_group),
        payoff: Set(None),
    }
    .insert(conn)
    .await
}

/// The player row of `participant_id` in round `round_number`, if that round exists.
pub async fn find_player_in_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
    round_number: i32,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .join(JoinType::InnerJoin, players::Relation::Subsession.def())
        .filter(players::Column::ParticipantId.eq(participant_id))
        .filter(subsessions::Column::RoundNumber.eq(round_number))
        .one(conn)
        .await
}

/// Every subsession, ordered by session then round.
pub async fn list_subsessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<subsessions::Model>, sea_orm::DbErr> {
    subsessions::Entity::find()
        .order_by_asc(subsessions::Column::SessionId)
        .order_by_asc(subsessions::Column::RoundNumber)
        .all(conn)
        .await
}

/// Every group, ordered by subsession then id_in_subsession.
pub async fn list_groups<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<groups::Model>, sea_orm::DbErr> {
    groups::Entity::find()
        .order_by_asc(groups::Column::SubsessionId)
        .order_by_asc(groups::Column::IdInSubsession)
        .all(conn)
        .await
}

/// Every player, in primary key order.
pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}
