use decisions_backend::domain::stubs::stub_values_for;
use decisions_backend::repos::decisions as decisions_repo;

use crate::support::factory::{player_in_round, seed_session_with, session_input};
use crate::support::test_state::build_test_state;

#[tokio::test]
async fn every_player_gets_five_stubs_in_range_each_round() {
    let state = build_test_state().await;
    let created = seed_session_with(&state, session_input("pilot", 3, None)).await;
    let db = state.db().expect("db");

    for participant in &created.participants {
        for round in 1..=3 {
            let player = player_in_round(&state, &participant.code, round).await;
            assert_eq!(decisions_repo::count_by_player(db, player.id).await.unwrap(), 5);

            let decisions = decisions_repo::find_by_player(db, player.id).await.unwrap();
            for d in &decisions {
                assert!((1..=10).contains(&d.value), "value {} out of range", d.value);
                assert_eq!(d.player_decision, None);
                assert_eq!(d.reason, None);
            }
        }
    }
}

#[tokio::test]
async fn seeded_sessions_reproduce_stub_values() {
    let state = build_test_state().await;
    let first = seed_session_with(&state, session_input("a", 2, Some(4242))).await;
    let second = seed_session_with(&state, session_input("b", 2, Some(4242))).await;
    let db = state.db().expect("db");

    assert_eq!(first.session.rng_seed, 4242);

    for (p1, p2) in first.participants.iter().zip(&second.participants) {
        for round in 1..=3 {
            let a = player_in_round(&state, &p1.code, round).await;
            let b = player_in_round(&state, &p2.code, round).await;

            let values_a: Vec<i32> = decisions_repo::find_by_player(db, a.id)
                .await
                .unwrap()
                .into_iter()
                .map(|d| d.value)
                .collect();
            let values_b: Vec<i32> = decisions_repo::find_by_player(db, b.id)
                .await
                .unwrap()
                .into_iter()
                .map(|d| d.value)
                .collect();

            assert_eq!(values_a, values_b);
            assert_eq!(values_a, stub_values_for(4242, round, p1.id_in_session));
        }
    }
}

#[tokio::test]
async fn unseeded_sessions_still_record_their_seed() {
    let state = build_test_state().await;
    let created = seed_session_with(&state, session_input("pilot", 1, None)).await;
    let db = state.db().expect("db");

    let player = player_in_round(&state, &created.participants[0].code, 2).await;
    let values: Vec<i32> = decisions_repo::find_by_player(db, player.id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.value)
        .collect();

    assert_eq!(values, stub_values_for(created.session.rng_seed, 2, 1));
}
