use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    /// Identifier of the client trying to reach the managed server
    pub client_id: String,
}
