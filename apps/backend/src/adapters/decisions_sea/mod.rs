//! SeaORM adapter for decision stubs.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::decisions;
use crate::infra::db_errors::DECISION_NOT_FOUND_PREFIX;

pub mod dto;

pub use dto::DecisionAnswerUpdate;

/// Insert one unanswered stub per value.
pub async fn create_stubs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    values: &[i32],
) -> Result<(), sea_orm::DbErr> {
    if values.is_empty() {
        return Ok(());
    }
    let now = time::OffsetDateTime::now_utc();
    let rows = values.iter().map(|&value| decisions::ActiveModel {
        id: NotSet,
        player_id: Set(player_id),
        value: Set(value),
        player_decision: Set(None),
        reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    });
    decisions::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// A player's decisions in creation order.
pub async fn find_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<decisions::Model>, sea_orm::DbErr> {
    decisions::Entity::find()
        .filter(decisions::Column::PlayerId.eq(player_id))
        .order_by_asc(decisions::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    decisions::Entity::find()
        .filter(decisions::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
}

/// Write `player_decision` and `reason` for one decision owned by the player.
///
/// Only those two columns (and `updated_at`) are touched. A decision that
/// does not exist or belongs to another player yields a
/// `DECISION_NOT_FOUND:<id>` custom error.
pub async fn update_answer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DecisionAnswerUpdate,
) -> Result<(), sea_orm::DbErr> {
    let result = decisions::Entity::update_many()
        .col_expr(
            decisions::Column::PlayerDecision,
            Expr::value(dto.player_decision),
        )
        .col_expr(decisions::Column::Reason, Expr::value(dto.reason))
        .col_expr(
            decisions::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(decisions::Column::Id.eq(dto.id))
        .filter(decisions::Column::PlayerId.eq(dto.player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::Custom(format!(
            "{DECISION_NOT_FOUND_PREFIX}{}",
            dto.id
        )));
    }
    Ok(())
}

/// Every decision, in primary key order.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<decisions::Model>, sea_orm::DbErr> {
    decisions::Entity::find()
        .order_by_asc(decisions::Column::Id)
        .all(conn)
        .await
}
