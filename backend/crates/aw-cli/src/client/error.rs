use error_location::ErrorLocation;
use serde_json::Value;
use std::panic::Location;
use thiserror::Error;

/// Failures of an admin command against aw-server
#[derive(Error, Debug)]
pub enum ClientError {
    /// aw-server could not be reached or its response could not be read
    #[error("Request to aw-server failed: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    /// aw-server is tearing down and no longer accepts lifecycle events
    #[error("aw-server is shutting down {location}")]
    Draining { location: ErrorLocation },

    /// The request, or the config file a reload read, was rejected
    #[error("Rejected ({code}): {message} {location}")]
    Rejected {
        code: String,
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Any other error response; `code` is `HTTP_<status>` when the body
    /// carried no error object
    #[error("aw-server returned {status} ({code}): {message} {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed response: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Classify an error response by its `{"error": {code, message, field}}` body
    #[track_caller]
    pub fn from_response(status: u16, body: &Value, raw: &str) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let Some(error) = body.get("error") else {
            return ClientError::Api {
                status,
                code: format!("HTTP_{}", status),
                message: raw.to_string(),
                location,
            };
        };

        let text = |key: &str| error.get(key).and_then(Value::as_str).map(str::to_string);
        let code = text("code").unwrap_or_else(|| format!("HTTP_{}", status));
        let message = text("message").unwrap_or_default();

        match code.as_str() {
            "DRAINING" => ClientError::Draining { location },
            "VALIDATION_ERROR" | "INVALID_CONFIG" => ClientError::Rejected {
                code,
                message,
                field: text("field"),
                location,
            },
            _ => ClientError::Api {
                status,
                code,
                message,
                location,
            },
        }
    }

    /// Process exit status for `aw`: 3 while draining, 2 when rejected, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            ClientError::Draining { .. } => 3,
            ClientError::Rejected { .. } => 2,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
