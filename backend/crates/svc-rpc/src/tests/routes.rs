use crate::{RpcState, build_router};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

fn test_server() -> TestServer {
    TestServer::builder()
        .build(build_router(RpcState::new("test-service")))
        .expect("Failed to create test server")
}

#[tokio::test]
async fn given_message_when_post_echo_then_result_is_message() {
    // Given
    let server = test_server();

    // When
    let response = server
        .post("/rpc/echo")
        .json(&json!({ "message": "abc" }))
        .await;

    // Then
    response.assert_status_ok();
    response.assert_json(&json!({ "result": "abc" }));
}

#[tokio::test]
async fn given_message_when_post_upper_case_then_result_upper_cased() {
    // Given
    let server = test_server();

    // When
    let response = server
        .post("/rpc/upper-case")
        .json(&json!({ "message": "abc" }))
        .await;

    // Then
    response.assert_status_ok();
    response.assert_json(&json!({ "result": "ABC" }));
}

#[tokio::test]
async fn given_null_message_when_post_upper_case_then_null_result() {
    // Given
    let server = test_server();

    // When
    let response = server
        .post("/rpc/upper-case")
        .json(&json!({ "message": null }))
        .await;

    // Then
    response.assert_status_ok();
    response.assert_json(&json!({ "result": null }));
}

#[tokio::test]
async fn given_missing_message_when_post_echo_then_null_result() {
    // Given
    let server = test_server();

    // When
    let response = server.post("/rpc/echo").json(&json!({})).await;

    // Then
    response.assert_status_ok();
    response.assert_json(&json!({ "result": null }));
}

#[tokio::test]
async fn given_malformed_body_when_post_echo_then_client_error() {
    // Given
    let server = test_server();

    // When
    let response = server
        .post("/rpc/echo")
        .text("not json")
        .expect_failure()
        .await;

    // Then
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn given_running_router_when_get_health_then_service_reported() {
    // Given
    let server = test_server();

    // When
    let response = server.get("/health").await;

    // Then
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "test-service");
}

#[tokio::test]
async fn given_running_router_when_probed_then_live_and_ready() {
    // Given
    let server = test_server();

    // When
    let live = server.get("/live").await;
    let ready = server.get("/ready").await;

    // Then
    assert_eq!(live.status_code(), StatusCode::OK);
    assert_eq!(ready.status_code(), StatusCode::OK);
    ready.assert_text("Ready");
}
