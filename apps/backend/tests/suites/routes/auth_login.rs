use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_response;
use backend_test_support::unique_helpers::{unique_email, unique_str};
use decisions_backend::auth::jwt::verify_access_token;
use serde_json::json;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::{
    build_test_state, build_test_state_with_allowlist, build_test_state_without_allowlist,
    test_security,
};

const LOGIN_URI: &str = "/api/auth/login";

#[actix_web::test]
async fn login_creates_user_and_returns_verifiable_token() {
    let app = create_test_app(build_test_state().await).await;
    let email = unique_email("pi");
    let sub = unique_str("google");

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": email.to_uppercase(), "name": "Ada", "google_sub": sub}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_json(resp).await;
    let token = body["token"].as_str().expect("token");
    let claims = verify_access_token(token, &test_security()).expect("token verifies");
    assert_eq!(claims.sub, sub);
    assert_eq!(claims.email, email.to_lowercase(), "email is stored normalized");
}

#[actix_web::test]
async fn repeat_login_is_idempotent_but_sub_mismatch_conflicts() {
    let app = create_test_app(build_test_state().await).await;
    let email = unique_email("pi");
    let sub = unique_str("google");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(LOGIN_URI)
            .set_json(json!({"email": email, "google_sub": sub}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": email, "google_sub": "another-account"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "GOOGLE_SUB_MISMATCH", StatusCode::CONFLICT).await;
}

#[actix_web::test]
async fn login_validates_input() {
    // Match-all list, so malformed emails reach validation.
    let app = create_test_app(build_test_state_with_allowlist("*").await).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": "  ", "google_sub": "abc"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "INVALID_EMAIL", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": "pi@lab.example.org"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "INVALID_GOOGLE_SUB", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn allowlist_blocks_other_domains() {
    let app = create_test_app(build_test_state_with_allowlist("*@lab.example.org").await).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": "intruder@elsewhere.org", "google_sub": "x1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "EMAIL_NOT_ALLOWED", StatusCode::FORBIDDEN).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": "member@lab.example.org", "google_sub": "x2"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn login_without_allowlist_is_refused() {
    let state = build_test_state_without_allowlist().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URI)
        .set_json(json!({"email": "stranger@evil.example", "google_sub": "made-up"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "EMAIL_NOT_ALLOWED", StatusCode::FORBIDDEN).await;
}
