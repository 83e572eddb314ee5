//! Session lifecycle: creates a session with all of its rounds up front.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::domain::codes::draw_distinct_codes;
use crate::domain::constants::{MAX_PARTICIPANTS, NUM_ROUNDS};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::rounds as rounds_repo;
use crate::repos::sessions::{self as sessions_repo, NewSession, Participant, Session};
use crate::services::rounds::start_round;

/// Experimenter input for a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub label: String,
    pub num_participants: i32,
    pub experimenter_name: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    /// Root seed for stub values; drawn from OS entropy when absent.
    pub seed: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session: Session,
    pub participants: Vec<Participant>,
}

fn validate(input: &CreateSession) -> Result<(), AppError> {
    if input.label.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidSession,
            "label must not be empty",
        ));
    }
    if !(1..=MAX_PARTICIPANTS).contains(&input.num_participants) {
        return Err(AppError::invalid(
            ErrorCode::InvalidSession,
            format!("num_participants must be between 1 and {MAX_PARTICIPANTS}"),
        ));
    }
    Ok(())
}

/// Redraw rounds before a session creation gives up on finding free codes.
const MAX_CODE_ROUNDS: usize = 3;

/// One session code and `num_participants` participant codes, none of which
/// is already stored. Checked before inserting so a collision never aborts
/// the surrounding transaction.
async fn allocate_codes<C, R>(
    conn: &C,
    rng: &mut R,
    num_participants: usize,
) -> Result<(String, Vec<String>), AppError>
where
    C: ConnectionTrait + Send + Sync,
    R: Rng + Send,
{
    let mut taken_sessions = HashSet::new();
    let mut taken_participants = HashSet::new();

    for attempt in 1..=MAX_CODE_ROUNDS {
        let session_code = draw_distinct_codes(rng, 1, &taken_sessions)
            .and_then(|mut codes| codes.pop())
            .ok_or_else(|| AppError::internal("session code space exhausted"))?;
        let participant_codes = draw_distinct_codes(rng, num_participants, &taken_participants)
            .ok_or_else(|| AppError::internal("participant code space exhausted"))?;

        let used_sessions =
            sessions_repo::session_codes_in_use(conn, std::slice::from_ref(&session_code)).await?;
        let used_participants =
            sessions_repo::participant_codes_in_use(conn, &participant_codes).await?;
        if used_sessions.is_empty() && used_participants.is_empty() {
            return Ok((session_code, participant_codes));
        }

        warn!(
            attempt,
            session_collisions = used_sessions.len(),
            participant_collisions = used_participants.len(),
            "Generated codes already in use; redrawing"
        );
        taken_sessions.extend(used_sessions);
        taken_participants.extend(used_participants);
    }

    Err(AppError::conflict(
        ErrorCode::CodeConflict,
        "Could not allocate unused access codes",
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create the session, its participants, and for every round one
/// subsession, one group and one player per participant, then run the
/// round-start hook for each player.
///
/// Expects to run inside a transaction so a failure leaves nothing behind.
pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: CreateSession,
) -> Result<CreatedSession, AppError> {
    // ThreadRng is not Send; seed a Send generator from it instead.
    let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
    create_session_with_rng(conn, input, &mut rng).await
}

/// [`create_session`] with the generator for codes and the fallback seed.
pub async fn create_session_with_rng<C, R>(
    conn: &C,
    input: CreateSession,
    rng: &mut R,
) -> Result<CreatedSession, AppError>
where
    C: ConnectionTrait + Send + Sync,
    R: Rng + Send,
{
    validate(&input)?;

    let (session_code, participant_codes) =
        allocate_codes(conn, rng, input.num_participants as usize).await?;
    let rng_seed = input.seed.unwrap_or_else(|| rng.random::<i64>());

    let session = sessions_repo::create_session(
        conn,
        NewSession {
            code: session_code,
            label: input.label.trim().to_string(),
            experimenter_name: non_blank(input.experimenter_name),
            comment: non_blank(input.comment),
            is_demo: input.is_demo,
            num_participants: input.num_participants,
            rng_seed,
        },
    )
    .await?;

    let mut participants = Vec::with_capacity(participant_codes.len());
    for (idx, code) in participant_codes.into_iter().enumerate() {
        let id_in_session = idx as i32 + 1;
        participants
            .push(sessions_repo::create_participant(conn, session.id, id_in_session, code).await?);
    }

    for round_number in 1..=NUM_ROUNDS {
        let subsession = rounds_repo::create_subsession(conn, session.id, round_number).await?;
        let group = rounds_repo::create_group(conn, subsession.id, 1).await?;
        for participant in &participants {
            let player = rounds_repo::create_player(
                conn,
                &group,
                participant.id,
                participant.id_in_session,
            )
            .await?;
            start_round(conn, &session, round_number, participant, &player).await?;
        }
    }

    info!(
        session_id = session.id,
        code = %session.code,
        num_participants = session.num_participants,
        rounds = NUM_ROUNDS,
        "Session created"
    );

    Ok(CreatedSession {
        session,
        participants,
    })
}

pub async fn list_sessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Session>, AppError> {
    Ok(sessions_repo::list_sessions(conn).await?)
}
