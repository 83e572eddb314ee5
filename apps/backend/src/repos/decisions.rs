//! Decision stub repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::decisions_sea as decisions_adapter;
use crate::domain::answers::DecisionAnswer;
use crate::domain::reason::Reason;
use crate::entities::decisions;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Decision domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub id: i64,
    pub player_id: i64,
    pub value: i32,
    pub player_decision: Option<bool>,
    pub reason: Option<Reason>,
}

pub async fn create_stubs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    values: &[i32],
) -> Result<(), DomainError> {
    Ok(decisions_adapter::create_stubs(conn, player_id, values).await?)
}

/// A player's decisions in creation order.
pub async fn find_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Decision>, DomainError> {
    let rows = decisions_adapter::find_by_player(conn, player_id).await?;
    rows.into_iter().map(Decision::try_from).collect()
}

pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, DomainError> {
    Ok(decisions_adapter::count_by_player(conn, player_id).await?)
}

/// Persist one answer. The decision must belong to `player_id`.
pub async fn record_answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    answer: &DecisionAnswer,
) -> Result<(), DomainError> {
    let dto = decisions_adapter::DecisionAnswerUpdate {
        id: answer.id,
        player_id,
        player_decision: answer.player_decision,
        reason: answer.reason.map(|r| r.code().to_string()),
    };
    Ok(decisions_adapter::update_answer(conn, dto).await?)
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Decision>, DomainError> {
    let rows = decisions_adapter::list_all(conn).await?;
    rows.into_iter().map(Decision::try_from).collect()
}

impl TryFrom<decisions::Model> for Decision {
    type Error = DomainError;

    fn try_from(model: decisions::Model) -> Result<Self, Self::Error> {
        let reason = match model.reason.as_deref() {
            None => None,
            Some(code) => Some(code.parse::<Reason>().map_err(|_| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Decision {} has unknown stored reason '{code}'", model.id),
                )
            })?),
        };
        Ok(Self {
            id: model.id,
            player_id: model.player_id,
            value: model.value,
            player_decision: model.player_decision,
            reason,
        })
    }
}
