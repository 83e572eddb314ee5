use std::collections::HashSet;

use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_response;
use serde_json::json;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::factory::seed_experimenter;
use crate::support::test_state::build_test_state;

const SESSIONS_URI: &str = "/api/sessions";

#[actix_web::test]
async fn creating_a_session_requires_a_token() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::post()
        .uri(SESSIONS_URI)
        .set_json(json!({"label": "pilot", "num_participants": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "UNAUTHORIZED_MISSING_BEARER", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn create_returns_participant_codes_and_pages_work() {
    let state = build_test_state().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri(SESSIONS_URI)
        .insert_header((AUTHORIZATION, experimenter.bearer.clone()))
        .set_json(json!({
            "label": "  pilot  ",
            "num_participants": 4,
            "experimenter_name": "Dr. Lee",
            "comment": "",
            "seed": 99
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let summary = read_json(resp).await;

    assert_eq!(summary["label"], "pilot");
    assert_eq!(summary["num_participants"], 4);
    assert_eq!(summary["experimenter_name"], "Dr. Lee");
    assert!(summary["comment"].is_null());

    let participants = summary["participants"].as_array().expect("participants");
    assert_eq!(participants.len(), 4);
    let codes: HashSet<&str> = participants
        .iter()
        .map(|p| p["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes.len(), 4, "participant codes are unique");

    let code = participants[3]["code"].as_str().unwrap();
    assert_eq!(participants[3]["id_in_session"], 4);
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/participants/{code}/rounds/3/decisions"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn list_is_ordered_by_label() {
    let state = build_test_state().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    let app = create_test_app(state).await;

    for label in ["zeta", "alpha", "mid"] {
        let req = test::TestRequest::post()
            .uri(SESSIONS_URI)
            .insert_header((AUTHORIZATION, experimenter.bearer.clone()))
            .set_json(json!({"label": label, "num_participants": 1}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(SESSIONS_URI)
        .insert_header((AUTHORIZATION, experimenter.bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = read_json(resp).await;

    let labels: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["alpha", "mid", "zeta"]);
    assert!(list[0].get("participants").is_none());
}

#[actix_web::test]
async fn invalid_session_parameters_are_rejected() {
    let state = build_test_state().await;
    let experimenter = seed_experimenter(&state, "pi@lab.example.org").await;
    let app = create_test_app(state).await;

    for body in [
        json!({"label": "pilot", "num_participants": 0}),
        json!({"label": "pilot", "num_participants": 1001}),
        json!({"label": " ", "num_participants": 3}),
    ] {
        let req = test::TestRequest::post()
            .uri(SESSIONS_URI)
            .insert_header((AUTHORIZATION, experimenter.bearer.clone()))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_response(resp, "INVALID_SESSION", StatusCode::BAD_REQUEST).await;
    }
}
