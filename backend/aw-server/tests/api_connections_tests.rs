//! Integration tests for connection API handlers
mod common;

use crate::common::{
    create_test_app, empty_request, json_request, loader_with, offline, online, read_json,
};

use aw_core::NotificationKind;
use aw_server::routes::build_router;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_connection_to_online_server_passes_through() {
    let app = create_test_app(online(Some(3)), loader_with(true));
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/connections",
            json!({ "client_id": "steve" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["client_id"], "steve");
    assert_eq!(json["outcome"], "online");
    assert_eq!(app.power.starts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_connection_to_offline_server_requests_start() {
    let mut app = create_test_app(offline(), loader_with(true));
    let router = build_router(app.state.clone());

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/connections",
            json!({ "client_id": "steve" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["outcome"], "starting");

    let second = router
        .oneshot(json_request(
            "POST",
            "/api/v1/connections",
            json!({ "client_id": "alex" }),
        ))
        .await
        .unwrap();
    assert_eq!(read_json(second).await["outcome"], "startup_in_progress");

    assert_eq!(app.power.starts.load(Ordering::SeqCst), 1);
    let first = app.notifications.recv().await.unwrap();
    assert_eq!(first.kind, NotificationKind::Starting);
}

#[tokio::test]
async fn test_connection_with_blank_client_id_returns_400() {
    let app = create_test_app(online(Some(0)), loader_with(true));
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/connections",
            json!({ "client_id": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "client_id");
}

#[tokio::test]
async fn test_disconnect_returns_204() {
    let app = create_test_app(offline(), loader_with(true));
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(empty_request("DELETE", "/api/v1/connections/steve"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_connection_after_teardown_returns_503() {
    let app = create_test_app(online(Some(0)), loader_with(true));
    app.state.orchestrator.on_teardown().await;
    let router = build_router(app.state.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/connections",
            json!({ "client_id": "steve" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(response).await["error"]["code"], "DRAINING");
}
