use actix_web::test;

use crate::common::read_json;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_latest_migration() {
    let app = create_test_app(build_test_state().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());

    let body = read_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_eq!(body["migrations"], "m20261016_000001_init");
    assert!(body["time"].as_str().is_some_and(|t| !t.is_empty()));
}
