use decisions_backend::domain::stubs::stub_values_for;
use decisions_backend::repos::rounds as rounds_repo;
use decisions_backend::repos::sessions::{self as sessions_repo, NewSession};
use decisions_backend::services::export::build_export;
use decisions_backend::services::rounds::start_round;
use decisions_backend::state::app_state::AppState;

use crate::support::factory::{seed_session, seed_session_with, session_input};
use crate::support::test_state::build_test_state;

/// One session, one subsession, one group, two players, five stubs each.
async fn single_round_fixture(state: &AppState) {
    let db = state.db().expect("db");
    let session = sessions_repo::create_session(
        db,
        NewSession {
            code: "SESSFIX1".to_string(),
            label: "fixture".to_string(),
            experimenter_name: None,
            comment: Some("single round".to_string()),
            is_demo: true,
            num_participants: 2,
            rng_seed: 11,
        },
    )
    .await
    .unwrap();

    let subsession = rounds_repo::create_subsession(db, session.id, 1).await.unwrap();
    let group = rounds_repo::create_group(db, subsession.id, 1).await.unwrap();

    // Insert the second participant's player first; export must still
    // order by position in the session.
    let first = sessions_repo::create_participant(db, session.id, 1, "PARTFIX1".into())
        .await
        .unwrap();
    let second = sessions_repo::create_participant(db, session.id, 2, "PARTFIX2".into())
        .await
        .unwrap();
    for participant in [&second, &first] {
        let player = rounds_repo::create_player(db, &group, participant.id, participant.id_in_session)
            .await
            .unwrap();
        start_round(db, &session, 1, participant, &player).await.unwrap();
    }
}

#[tokio::test]
async fn single_round_session_has_expected_shape() {
    let state = build_test_state().await;
    single_round_fixture(&state).await;

    let export = build_export(state.db().unwrap()).await.unwrap();
    assert_eq!(export.len(), 1);

    let session = &export[0];
    assert_eq!(session.code, "SESSFIX1");
    assert!(session.is_demo);
    assert_eq!(session.comment.as_deref(), Some("single round"));
    assert_eq!(session.subsessions.len(), 1);
    assert_eq!(session.subsessions[0].round_number, 1);
    assert_eq!(session.subsessions[0].groups.len(), 1);

    let players = &session.subsessions[0].groups[0].players;
    assert_eq!(players.len(), 2);
    let positions: Vec<i32> = players.iter().map(|p| p.participant_id_in_session).collect();
    assert_eq!(positions, [1, 2]);
    for player in players {
        assert_eq!(player.decisions.len(), 5);
        assert!(player.decisions.iter().all(|d| (1..=10).contains(&d.value)));
    }
}

#[tokio::test]
async fn serialized_fields_follow_declared_order() {
    let state = build_test_state().await;
    single_round_fixture(&state).await;

    let export = build_export(state.db().unwrap()).await.unwrap();
    let text = serde_json::to_string(&export).unwrap();

    let position = |needle: &str| {
        text.find(needle)
            .unwrap_or_else(|| panic!("{needle} missing from {text}"))
    };
    let session_fields = [
        "\"code\"",
        "\"label\"",
        "\"experimenter_name\"",
        "\"time_started\"",
        "\"comment\"",
        "\"is_demo\"",
        "\"subsessions\"",
        "\"round_number\"",
        "\"groups\"",
        "\"id_in_subsession\"",
        "\"players\"",
        "\"id_in_group\"",
        "\"payoff\"",
        "\"participant_id_in_session\"",
        "\"decisions\"",
        "\"value\"",
        "\"player_decision\"",
        "\"reason\"",
    ];
    let positions: Vec<usize> = session_fields.iter().map(|f| position(f)).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "export keys out of declared order: {text}");
}

#[tokio::test]
async fn export_is_stable_across_calls() {
    let state = build_test_state().await;
    seed_session(&state, "beta", 2).await;
    seed_session(&state, "alpha", 1).await;
    seed_session(&state, "alpha", 1).await;

    let db = state.db().unwrap();
    let first = build_export(db).await.unwrap();
    let second = build_export(db).await.unwrap();
    assert_eq!(first, second);

    let labels: Vec<&str> = first.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["alpha", "alpha", "beta"]);
}

#[tokio::test]
async fn whole_table_loads_stitch_every_session_correctly() {
    let state = build_test_state().await;
    let sizes = [("s1", 1, 101_i64), ("s2", 3, 202), ("s3", 5, 303)];
    for (label, n, seed) in sizes {
        seed_session_with(&state, session_input(label, n, Some(seed))).await;
    }

    let export = build_export(state.db().unwrap()).await.unwrap();
    assert_eq!(export.len(), sizes.len());

    for (session, (label, n, seed)) in export.iter().zip(sizes) {
        assert_eq!(session.label, label);
        assert_eq!(session.subsessions.len(), 3);
        for subsession in &session.subsessions {
            assert_eq!(subsession.groups.len(), 1);
            let players = &subsession.groups[0].players;
            assert_eq!(players.len(), n as usize, "{label} round {}", subsession.round_number);

            // Values only match if each player got its own decisions back.
            for player in players {
                let values: Vec<i32> = player.decisions.iter().map(|d| d.value).collect();
                assert_eq!(
                    values,
                    stub_values_for(seed, subsession.round_number, player.participant_id_in_session)
                );
            }
        }
    }
}
