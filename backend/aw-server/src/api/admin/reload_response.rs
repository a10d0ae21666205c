use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: String,
    pub auto_shutdown_enabled: bool,
}
