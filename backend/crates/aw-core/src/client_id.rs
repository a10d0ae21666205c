use crate::{CoreError, CoreResult};

use std::fmt;

use serde::Serialize;

/// Identifies a client waiting on the managed server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Parse a client id. Surrounding whitespace is trimmed; empty ids are rejected.
    #[track_caller]
    pub fn parse(value: &str) -> CoreResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation(
                "client_id must not be empty",
                "client_id",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
