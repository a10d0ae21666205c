//! Integration tests for the panel client using wiremock mock server

use aw_power::{ClientError, OFFLINE_STATUS, PanelClient, PowerControl, PowerSignal};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const SERVER_ID: &str = "1a7ce997";

#[tokio::test]
async fn test_request_start_sends_signal_with_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .and(header("Authorization", "Bearer ptlc_test"))
        .and(header("Accept", "application/json"))
        .and(body_json(json!({ "signal": "start" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");

    assert!(client.request_start(SERVER_ID).await);
}

#[tokio::test]
async fn test_request_stop_sends_stop_signal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .and(body_json(json!({ "signal": "stop" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");

    assert!(client.request_stop(SERVER_ID).await);
}

#[tokio::test]
async fn test_request_start_failure_status_returns_false_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{ "code": "AccessDeniedHttpException", "status": "403" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "bad_key");

    assert!(!client.request_start(SERVER_ID).await);
}

#[tokio::test]
async fn test_send_power_signal_error_carries_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/client/servers/{}/power", SERVER_ID)))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");
    let result = client
        .send_power_signal(SERVER_ID, PowerSignal::Start)
        .await;

    match result {
        Err(ClientError::Status { status, body, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(body, "conflict");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_status_returns_current_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .and(header("Authorization", "Bearer ptlc_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "stats",
            "attributes": {
                "current_state": "running",
                "is_suspended": false,
                "resources": { "memory_bytes": 1024 }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");

    assert_eq!(client.query_status(SERVER_ID).await, "running");
}

#[tokio::test]
async fn test_query_status_error_status_maps_to_offline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");

    assert_eq!(client.query_status(SERVER_ID).await, OFFLINE_STATUS);
}

#[tokio::test]
async fn test_query_status_malformed_body_maps_to_offline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/client/servers/{}/resources", SERVER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");

    assert!(matches!(
        client.server_state(SERVER_ID).await,
        Err(ClientError::Json { .. })
    ));
    assert_eq!(client.query_status(SERVER_ID).await, OFFLINE_STATUS);
}

#[tokio::test]
async fn test_unreachable_panel_returns_failure() {
    let client = PanelClient::new("http://127.0.0.1:1", "ptlc_test");

    assert!(!client.request_start(SERVER_ID).await);
    assert_eq!(client.query_status(SERVER_ID).await, OFFLINE_STATUS);
}

#[tokio::test]
async fn test_released_client_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = PanelClient::new(&mock_server.uri(), "ptlc_test");
    client.release();

    assert!(!client.request_stop(SERVER_ID).await);
    assert!(matches!(
        client
            .send_power_signal(SERVER_ID, PowerSignal::Stop)
            .await,
        Err(ClientError::Released { .. })
    ));
}
