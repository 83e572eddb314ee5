//! Round-start hook: gives every player their decision stubs.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::domain::stubs::stub_values_for;
use crate::error::AppError;
use crate::repos::decisions as decisions_repo;
use crate::repos::rounds::Player;
use crate::repos::sessions::{Participant, Session};

/// Create this round's decision stubs for one player.
///
/// Runs once per player per round; calling it twice for the same player
/// adds a second batch.
pub async fn start_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: &Session,
    round_number: i32,
    participant: &Participant,
    player: &Player,
) -> Result<(), AppError> {
    let values = stub_values_for(session.rng_seed, round_number, participant.id_in_session);
    generate_decision_stubs(conn, player, &values).await?;
    debug!(
        session_id = session.id,
        round_number,
        player_id = player.id,
        ?values,
        "Decision stubs created"
    );
    Ok(())
}

/// Persist one unanswered decision per value.
pub async fn generate_decision_stubs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
    values: &[i32],
) -> Result<(), AppError> {
    decisions_repo::create_stubs(conn, player.id, values).await?;
    Ok(())
}
