use crate::{ApiError, ServerError};

use aw_core::CoreError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "client id must not be empty".into(),
        field: Some("client_id".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "client_id");
}

#[tokio::test]
async fn test_draining_returns_503() {
    let error = ApiError::Draining {
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "DRAINING");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "boom".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "boom");
}

#[test]
fn test_core_errors_map_to_api_errors() {
    assert!(matches!(
        ApiError::from(CoreError::draining()),
        ApiError::Draining { .. }
    ));
    assert!(matches!(
        ApiError::from(CoreError::validation("empty", "client_id")),
        ApiError::Validation { field: Some(ref f), .. } if f == "client_id"
    ));
    assert!(matches!(
        ApiError::from(CoreError::config("target port must not be 0")),
        ApiError::InvalidConfig { .. }
    ));
}

#[tokio::test]
async fn test_config_error_maps_to_invalid_config() {
    let error = ApiError::from(ServerError::Config(aw_config::ConfigError::control(
        "control.server_id is required",
    )));

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_CONFIG");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("server_id")
    );
}
