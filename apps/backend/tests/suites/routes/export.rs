use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_response;
use serde_json::json;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::auth::{bearer_header, expired_bearer_header};
use crate::support::factory::{seed_experimenter, seed_session};
use crate::support::test_state::{
    build_test_state, build_test_state_with_allowlist, build_test_state_without_allowlist,
    test_security,
};

const EXPORT_URI: &str = "/api/export/decisions";

#[actix_web::test]
async fn export_without_token_is_401() {
    let app = create_test_app(build_test_state().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(EXPORT_URI).to_request()).await;
    assert_problem_response(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn export_with_bad_or_expired_token_is_401() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((
            AUTHORIZATION,
            expired_bearer_header("sub", "pi@lab.example.org", &test_security()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "UNAUTHORIZED_EXPIRED_JWT", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn valid_token_for_unknown_user_is_403() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((
            AUTHORIZATION,
            bearer_header("ghost", "ghost@lab.example.org", &test_security()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "FORBIDDEN_USER_NOT_FOUND", StatusCode::FORBIDDEN).await;
}

#[actix_web::test]
async fn token_outside_allowlist_is_403() {
    let state = build_test_state_with_allowlist("*@lab.example.org").await;
    let outsider = seed_experimenter(&state, "someone@elsewhere.org").await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((AUTHORIZATION, outsider.bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "EMAIL_NOT_ALLOWED", StatusCode::FORBIDDEN).await;
}

#[actix_web::test]
async fn export_is_closed_without_allowlist() {
    let state = build_test_state_without_allowlist().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    seed_session(&state, "study", 1).await;
    let app = create_test_app(state).await;

    // Self-service login yields no token.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "stranger@evil.example", "google_sub": "made-up"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "EMAIL_NOT_ALLOWED", StatusCode::FORBIDDEN).await;

    // A validly signed token for an existing user is refused too.
    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((AUTHORIZATION, experimenter.bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "EMAIL_NOT_ALLOWED", StatusCode::FORBIDDEN).await;
}

#[actix_web::test]
async fn export_nests_every_level_in_order() {
    let state = build_test_state().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    seed_session(&state, "b-study", 2).await;
    seed_session(&state, "a-study", 3).await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((AUTHORIZATION, experimenter.bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let export = read_json(resp).await;

    let sessions = export.as_array().expect("array of sessions");
    let labels: Vec<_> = sessions.iter().map(|s| s["label"].as_str().unwrap()).collect();
    assert_eq!(labels, ["a-study", "b-study"]);

    for (session, participants) in sessions.iter().zip([3usize, 2]) {
        assert_eq!(session["experimenter_name"], "Dr. Test");
        assert_eq!(session["is_demo"], false);
        assert!(session["time_started"].is_string());

        let subsessions = session["subsessions"].as_array().unwrap();
        let rounds: Vec<_> = subsessions.iter().map(|s| s["round_number"].as_i64().unwrap()).collect();
        assert_eq!(rounds, [1, 2, 3]);

        for subsession in subsessions {
            let groups = subsession["groups"].as_array().unwrap();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0]["id_in_subsession"], 1);

            let players = groups[0]["players"].as_array().unwrap();
            assert_eq!(players.len(), participants);
            let positions: Vec<_> = players
                .iter()
                .map(|p| p["participant_id_in_session"].as_i64().unwrap())
                .collect();
            assert_eq!(positions, (1..=participants as i64).collect::<Vec<_>>());

            for player in players {
                assert!(player["payoff"].is_null());
                let decisions = player["decisions"].as_array().unwrap();
                assert_eq!(decisions.len(), 5);
                for d in decisions {
                    assert_eq!(
                        d.as_object().unwrap().keys().count(),
                        3,
                        "decision exposes value, player_decision, reason only"
                    );
                    assert!(d["player_decision"].is_null());
                    assert!(d["reason"].is_null());
                }
            }
        }
    }
}

#[actix_web::test]
async fn export_of_empty_database_is_empty_array() {
    let state = build_test_state().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri(EXPORT_URI)
        .insert_header((AUTHORIZATION, experimenter.bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, json!([]));
}
