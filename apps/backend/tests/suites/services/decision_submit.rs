use decisions_backend::db::txn::with_txn;
use decisions_backend::domain::answers::DecisionAnswer;
use decisions_backend::domain::reason::Reason;
use decisions_backend::errors::ErrorCode;
use decisions_backend::repos::decisions as decisions_repo;
use decisions_backend::services::decisions::{render_page, submit_decisions};

use crate::support::factory::{player_in_round, seed_session};
use crate::support::test_state::build_test_state;

fn answers(ids: &[i64], decision: Option<bool>, reason: Option<Reason>) -> Vec<DecisionAnswer> {
    ids.iter()
        .map(|&id| DecisionAnswer {
            id,
            player_decision: decision,
            reason,
        })
        .collect()
}

#[tokio::test]
async fn submit_writes_answers_and_leaves_values() {
    let state = build_test_state().await;
    let created = seed_session(&state, "pilot", 1).await;
    let code = created.participants[0].code.clone();
    let db = state.db().expect("db");

    let before = render_page(db, &code, 1).await.unwrap();
    let ids: Vec<i64> = before.decisions.iter().map(|d| d.id).collect();

    let mut submitted = answers(&ids, Some(false), None);
    submitted[0].player_decision = Some(true);
    submitted[0].reason = Some(Reason::ExampleReason);
    submitted[4].player_decision = None;

    let page = submit_decisions(db, &code, 1, &submitted).await.unwrap();

    let decisions: Vec<_> = page.decisions.iter().map(|d| d.player_decision).collect();
    assert_eq!(decisions, [Some(true), Some(false), Some(false), Some(false), None]);
    assert_eq!(page.decisions[0].reason, Some(Reason::ExampleReason));

    let values_before: Vec<i32> = before.decisions.iter().map(|d| d.value).collect();
    let values_after: Vec<i32> = page.decisions.iter().map(|d| d.value).collect();
    assert_eq!(values_before, values_after);
}

#[tokio::test]
async fn unknown_id_rolls_back_the_whole_submission() {
    let state = build_test_state().await;
    let created = seed_session(&state, "pilot", 1).await;
    let code = created.participants[0].code.clone();

    let ids: Vec<i64> = render_page(state.db().unwrap(), &code, 1)
        .await
        .unwrap()
        .decisions
        .iter()
        .map(|d| d.id)
        .collect();

    let mut submitted = answers(&ids, Some(true), Some(Reason::DontKnow));
    submitted[4].id = i64::MAX;

    let txn_code = code.clone();
    let err = with_txn(None, &state, move |txn| {
        Box::pin(async move { submit_decisions(txn, &txn_code, 1, &submitted).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DecisionNotFound);

    let page = render_page(state.db().unwrap(), &code, 1).await.unwrap();
    assert!(page.decisions.iter().all(|d| d.player_decision.is_none()));
    assert!(page.decisions.iter().all(|d| d.reason.is_none()));
}

#[tokio::test]
async fn ids_are_scoped_to_the_player() {
    let state = build_test_state().await;
    let created = seed_session(&state, "pilot", 2).await;
    let db = state.db().expect("db");

    let other = player_in_round(&state, &created.participants[1].code, 1).await;
    let foreign: Vec<i64> = decisions_repo::find_by_player(db, other.id)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();

    let err = submit_decisions(
        db,
        &created.participants[0].code,
        1,
        &answers(&foreign, Some(true), None),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DecisionNotFound);

    let untouched = decisions_repo::find_by_player(db, other.id).await.unwrap();
    assert!(untouched.iter().all(|d| d.player_decision.is_none()));
}

#[tokio::test]
async fn extra_stubs_are_data_corruption() {
    let state = build_test_state().await;
    let created = seed_session(&state, "pilot", 1).await;
    let code = created.participants[0].code.clone();
    let db = state.db().expect("db");

    let player = player_in_round(&state, &code, 1).await;
    decisions_repo::create_stubs(db, player.id, &[1, 2]).await.unwrap();

    let err = render_page(db, &code, 1).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataCorruption);
}
