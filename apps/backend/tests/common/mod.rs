#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Each suite binary gets one test subscriber.
#[ctor::ctor]
unsafe fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a JSON body, failing with the raw text if it does not parse.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON ({e}): {}",
            String::from_utf8_lossy(&body)
        )
    })
}
