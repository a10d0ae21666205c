use aw_core::ConnectionOutcome;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub client_id: String,
    pub outcome: ConnectionOutcome,
}
