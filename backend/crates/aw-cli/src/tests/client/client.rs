use crate::{Client, ClientError};

use serde_json::{Value, json};

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = Client::new("http://localhost:8000/");
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn test_base_url_no_trailing_slash() {
    let client = Client::new("http://localhost:8000");
    assert_eq!(client.base_url, "http://localhost:8000");
}

#[test]
fn test_draining_code_maps_to_draining() {
    let body = json!({ "error": { "code": "DRAINING", "message": "Service is shutting down" } });
    let error = ClientError::from_response(503, &body, "");

    assert!(matches!(error, ClientError::Draining { .. }));
    assert_eq!(error.exit_code(), 3);
}

#[test]
fn test_validation_code_keeps_field() {
    let body = json!({
        "error": {
            "code": "VALIDATION_ERROR",
            "message": "client_id must not be empty",
            "field": "client_id"
        }
    });
    let error = ClientError::from_response(400, &body, "");

    match &error {
        ClientError::Rejected { code, field, .. } => {
            assert_eq!(code, "VALIDATION_ERROR");
            assert_eq!(field.as_deref(), Some("client_id"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_unknown_code_stays_generic_api_error() {
    let body = json!({ "error": { "code": "INTERNAL_ERROR", "message": "boom" } });
    let error = ClientError::from_response(500, &body, "");

    match &error {
        ClientError::Api { status, code, message, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(code, "INTERNAL_ERROR");
            assert_eq!(message, "boom");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn test_body_without_error_object_uses_status_code() {
    let error = ClientError::from_response(502, &Value::Null, "Bad Gateway");

    match error {
        ClientError::Api { code, message, .. } => {
            assert_eq!(code, "HTTP_502");
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}
