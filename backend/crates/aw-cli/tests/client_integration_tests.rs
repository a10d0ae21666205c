//! Integration tests for the CLI client using wiremock mock server

use aw_cli::{Client, ClientError};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_status_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "idle",
            "target": "localhost:25565",
            "server_id": "1a7ce997",
            "tcp_reachable": true,
            "protocol_online": true,
            "player_count": 3,
            "control_status": "running",
            "auto_shutdown": { "enabled": true, "active": false, "seconds_remaining": null }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.status().await.unwrap();

    assert_eq!(result["state"], "idle");
    assert_eq!(result["player_count"], 3);
}

#[tokio::test]
async fn test_timer_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/timer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enabled": true,
            "active": true,
            "seconds_remaining": 240
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.timer().await.unwrap();

    assert_eq!(result["seconds_remaining"], 240);
}

#[tokio::test]
async fn test_connect_sends_client_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/connections"))
        .and(body_json(json!({ "client_id": "steve" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client_id": "steve",
            "outcome": "starting"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.connect("steve").await.unwrap();

    assert_eq!(result["outcome"], "starting");
}

#[tokio::test]
async fn test_disconnect_handles_empty_204_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/connections/steve"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.disconnect("steve").await.unwrap();

    assert_eq!(result["disconnected"], "steve");
}

#[tokio::test]
async fn test_shutdown_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/shutdown"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "status": "scheduled",
            "delay_secs": 5
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.shutdown().await.unwrap();

    assert_eq!(result["status"], "scheduled");
    assert_eq!(result["delay_secs"], 5);
}

#[tokio::test]
async fn test_reload_invalid_config_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "INVALID_CONFIG",
                "message": "control.server_id is required"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.reload().await;

    match result {
        Err(ClientError::Rejected { code, message, .. }) => {
            assert_eq!(code, "INVALID_CONFIG");
            assert!(message.contains("server_id"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_draining_server_returns_draining_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/connections"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": "DRAINING", "message": "Service is shutting down" }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.connect("steve").await;

    assert!(matches!(result, Err(ClientError::Draining { .. })));
}

#[tokio::test]
async fn test_error_without_json_body_maps_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());
    let result = client.status().await;

    assert!(matches!(result, Err(ClientError::Api { ref code, .. }) if code == "HTTP_502"));
}

#[tokio::test]
async fn test_plain_text_error_body_kept_as_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/timer"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri());

    match client.timer().await {
        Err(ClientError::Api { status, message, .. }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_returns_http_error() {
    let client = Client::new("http://127.0.0.1:1");
    let result = client.status().await;

    assert!(matches!(result, Err(ClientError::Http { .. })));
}
