//! Subsession, group and player repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::{groups, players, subsessions};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsession {
    pub id: i64,
    pub session_id: i64,
    pub round_number: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub subsession_id: i64,
    pub id_in_subsession: i32,
}

/// One participant's data for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub subsession_id: i64,
    pub group_id: i64,
    pub participant_id: i64,
    pub id_in_group: i32,
    pub payoff: Option<i32>,
}

pub async fn create_subsession<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    round_number: i32,
) -> Result<Subsession, DomainError> {
    let row = rounds_adapter::create_subsession(conn, session_id, round_number).await?;
    Ok(row.into())
}

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subsession_id: i64,
    id_in_subsession: i32,
) -> Result<Group, DomainError> {
    let row = rounds_adapter::create_group(conn, subsession_id, id_in_subsession).await?;
    Ok(row.into())
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group: &Group,
    participant_id: i64,
    id_in_group: i32,
) -> Result<Player, DomainError> {
    let dto = rounds_adapter::PlayerCreate {
        subsession_id: group.subsession_id,
        group_id: group.id,
        participant_id,
        id_in_group,
    };
    Ok(rounds_adapter::create_player(conn, dto).await?.into())
}

pub async fn find_player_in_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_id: i64,
    round_number: i32,
) -> Result<Option<Player>, DomainError> {
    let row = rounds_adapter::find_player_in_round(conn, participant_id, round_number).await?;
    Ok(row.map(Player::from))
}

pub async fn list_subsessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Subsession>, DomainError> {
    let rows = rounds_adapter::list_subsessions(conn).await?;
    Ok(rows.into_iter().map(Subsession::from).collect())
}

pub async fn list_groups<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Group>, DomainError> {
    let rows = rounds_adapter::list_groups(conn).await?;
    Ok(rows.into_iter().map(Group::from).collect())
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Player>, DomainError> {
    let rows = rounds_adapter::list_players(conn).await?;
    Ok(rows.into_iter().map(Player::from).collect())
}

impl From<subsessions::Model> for Subsession {
    fn from(model: subsessions::Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            round_number: model.round_number,
        }
    }
}

impl From<groups::Model> for Group {
    fn from(model: groups::Model) -> Self {
        Self {
            id: model.id,
            subsession_id: model.subsession_id,
            id_in_subsession: model.id_in_subsession,
        }
    }
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            subsession_id: model.subsession_id,
            group_id: model.group_id,
            participant_id: model.participant_id,
            id_in_group: model.id_in_group,
            payoff: model.payoff,
        }
    }
}
