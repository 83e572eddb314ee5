use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_response;

use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn every_response_carries_a_request_id() {
    let app = create_test_app(build_test_state().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(request_id.len(), 36, "uuid v4 expected, got {request_id}");
}

#[actix_web::test]
async fn handler_errors_reuse_the_request_id_as_trace_id() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get()
        .uri("/api/participants/NOPE0000/rounds/1/decisions")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");

    let problem =
        assert_problem_response(resp, "PARTICIPANT_NOT_FOUND", StatusCode::NOT_FOUND).await;
    assert_eq!(problem.trace_id, request_id);
    assert_eq!(problem.title, "Participant Not Found");
}

#[actix_web::test]
async fn middleware_rejections_reuse_the_request_id_as_trace_id() {
    let app = create_test_app(build_test_state().await).await;

    let req = test::TestRequest::get()
        .uri("/api/export/decisions")
        .to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-request-id header");

    let problem = assert_problem_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
    )
    .await;
    assert_eq!(problem.trace_id, request_id);
}
