//! Rows the HTTP tests need to exist before the request under test.

use decisions_backend::db::txn::with_txn;
use decisions_backend::repos::rounds::{self as rounds_repo, Player};
use decisions_backend::repos::sessions::{self as sessions_repo, Participant};
use decisions_backend::repos::users::User;
use decisions_backend::services::sessions::{create_session, CreateSession, CreatedSession};
use decisions_backend::services::users::ensure_user;
use decisions_backend::state::app_state::AppState;

use super::auth::bearer_header;

pub struct Experimenter {
    pub user: User,
    pub bearer: String,
}

pub async fn seed_experimenter(state: &AppState, email: &str) -> Experimenter {
    let db = state.db().expect("state has a database");
    let sub = format!("google-{email}");
    let user = ensure_user(db, email, Some("Test Experimenter"), &sub)
        .await
        .expect("experimenter created");
    let bearer = bearer_header(&user.sub, &user.email, &state.security);
    Experimenter { user, bearer }
}

pub fn session_input(label: &str, num_participants: i32, seed: Option<i64>) -> CreateSession {
    CreateSession {
        label: label.to_string(),
        num_participants,
        experimenter_name: Some("Dr. Test".to_string()),
        comment: None,
        is_demo: false,
        seed,
    }
}

/// Create a session with all rounds, committed.
pub async fn seed_session(state: &AppState, label: &str, num_participants: i32) -> CreatedSession {
    seed_session_with(state, session_input(label, num_participants, Some(7))).await
}

pub async fn seed_session_with(state: &AppState, input: CreateSession) -> CreatedSession {
    with_txn(None, state, move |txn| {
        Box::pin(async move { create_session(txn, input).await })
    })
    .await
    .expect("session created")
}

pub async fn participant(state: &AppState, code: &str) -> Participant {
    let db = state.db().expect("state has a database");
    sessions_repo::find_participant_by_code(db, code)
        .await
        .expect("lookup")
        .expect("participant exists")
}

pub async fn player_in_round(state: &AppState, code: &str, round_number: i32) -> Player {
    let participant = participant(state, code).await;
    let db = state.db().expect("state has a database");
    rounds_repo::find_player_in_round(db, participant.id, round_number)
        .await
        .expect("lookup")
        .expect("player exists")
}
