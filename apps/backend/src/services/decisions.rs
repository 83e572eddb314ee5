//! The decision page: one editable (decision, reason) pair per stub.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{error, info};

use crate::domain::answers::{check_shape, interpret, DecisionAnswer, SubmittedAnswer};
use crate::domain::constants::{NUM_DECISIONS_PER_ROUND, NUM_ROUNDS};
use crate::domain::reason::{reason_choices, Reason, ReasonChoice};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::decisions::{self as decisions_repo, Decision};
use crate::repos::rounds::{self as rounds_repo, Player};
use crate::repos::sessions as sessions_repo;

/// One row of the decision page.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub id: i64,
    pub value: i32,
    pub player_decision: Option<bool>,
    pub reason: Option<Reason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionPage {
    pub participant_code: String,
    pub round_number: i32,
    pub num_rounds: i32,
    pub decisions: Vec<DecisionView>,
    pub reason_choices: Vec<ReasonChoice>,
}

/// Resolve the player behind a participant code in a given round.
pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_code: &str,
    round_number: i32,
) -> Result<Player, AppError> {
    if !(1..=NUM_ROUNDS).contains(&round_number) {
        return Err(AppError::invalid(
            ErrorCode::InvalidRound,
            format!("round must be between 1 and {NUM_ROUNDS}"),
        ));
    }

    let participant = sessions_repo::find_participant_by_code(conn, participant_code)
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::ParticipantNotFound, "Unknown participant code")
        })?;

    rounds_repo::find_player_in_round(conn, participant.id, round_number)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::PlayerNotFound,
                format!("No player for this participant in round {round_number}"),
            )
        })
}

/// Load the player's decisions and enforce the per-round count.
async fn load_decisions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
) -> Result<Vec<Decision>, AppError> {
    let decisions = decisions_repo::find_by_player(conn, player.id).await?;
    if decisions.len() != NUM_DECISIONS_PER_ROUND {
        error!(
            player_id = player.id,
            expected = NUM_DECISIONS_PER_ROUND,
            found = decisions.len(),
            "Decision count invariant violated"
        );
        return Err(AppError::data_corruption(format!(
            "Player {} has {} decisions, expected {NUM_DECISIONS_PER_ROUND}",
            player.id,
            decisions.len()
        )));
    }
    Ok(decisions)
}

fn page(participant_code: &str, round_number: i32, decisions: Vec<Decision>) -> DecisionPage {
    DecisionPage {
        participant_code: participant_code.to_string(),
        round_number,
        num_rounds: NUM_ROUNDS,
        decisions: decisions
            .into_iter()
            .map(|d| DecisionView {
                id: d.id,
                value: d.value,
                player_decision: d.player_decision,
                reason: d.reason,
            })
            .collect(),
        reason_choices: reason_choices(),
    }
}

pub async fn render_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_code: &str,
    round_number: i32,
) -> Result<DecisionPage, AppError> {
    let player = find_player(conn, participant_code, round_number).await?;
    let decisions = load_decisions(conn, &player).await?;
    Ok(page(participant_code, round_number, decisions))
}

/// Fail with `DECISION_NOT_FOUND` unless every id is one of the player's
/// decisions.
async fn ensure_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
    mut ids: impl Iterator<Item = i64>,
) -> Result<(), AppError> {
    let known: HashSet<i64> = load_decisions(conn, player)
        .await?
        .iter()
        .map(|d| d.id)
        .collect();

    match ids.find(|id| !known.contains(id)) {
        Some(unknown) => Err(AppError::not_found(
            ErrorCode::DecisionNotFound,
            format!("Decision {unknown} does not belong to this player"),
        )),
        None => Ok(()),
    }
}

/// Submission as it arrived from the page. Checks run in order: shape
/// (count, duplicate ids), id ownership, then field values, so an unknown id
/// is reported even when a reason in the same request is also invalid.
pub async fn submit_form<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_code: &str,
    round_number: i32,
    submitted: Vec<SubmittedAnswer>,
) -> Result<DecisionPage, AppError> {
    check_shape(&submitted)?;
    let player = find_player(conn, participant_code, round_number).await?;
    ensure_owned(conn, &player, submitted.iter().map(|a| a.id)).await?;
    let answers = interpret(submitted)?;
    apply(conn, participant_code, round_number, &player, &answers).await
}

/// Apply a validated submission and return the updated page.
///
/// Every id must be one of this player's decisions; otherwise nothing is
/// written by the caller's transaction. Only `player_decision` and `reason`
/// change.
pub async fn submit_decisions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_code: &str,
    round_number: i32,
    answers: &[DecisionAnswer],
) -> Result<DecisionPage, AppError> {
    let player = find_player(conn, participant_code, round_number).await?;
    ensure_owned(conn, &player, answers.iter().map(|a| a.id)).await?;
    apply(conn, participant_code, round_number, &player, answers).await
}

async fn apply<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    participant_code: &str,
    round_number: i32,
    player: &Player,
    answers: &[DecisionAnswer],
) -> Result<DecisionPage, AppError> {
    for answer in answers {
        decisions_repo::record_answer(conn, player.id, answer).await?;
    }

    info!(
        player_id = player.id,
        round_number,
        answered = answers.iter().filter(|a| a.player_decision.is_some()).count(),
        "Decisions submitted"
    );

    let decisions = load_decisions(conn, player).await?;
    Ok(page(participant_code, round_number, decisions))
}
