use crate::{ClientError, ClientResult, OFFLINE_STATUS, PowerControl, PowerSignal};

use std::sync::Mutex;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{Client as ReqwestClient, Method};
use serde::{Deserialize, Serialize};

/// HTTP client for a Pterodactyl-style panel client API
pub struct PanelClient {
    pub base_url: String,
    api_key: String,
    client: Mutex<Option<ReqwestClient>>,
}

#[derive(Serialize)]
struct PowerRequest {
    signal: PowerSignal,
}

#[derive(Deserialize)]
struct ResourcesResponse {
    attributes: ResourceAttributes,
}

#[derive(Deserialize)]
struct ResourceAttributes {
    current_state: String,
}

impl PanelClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Panel URL (e.g., "https://panel.example.com")
    /// * `api_key` - Client API key sent as a bearer token
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Mutex::new(Some(ReqwestClient::new())),
        }
    }

    pub fn is_released(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    /// Build an authorized request, or fail if the pool was released
    fn request(&self, method: Method, path: &str) -> ClientResult<reqwest::RequestBuilder> {
        let client = self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or_else(ClientError::released)?;

        let url = format!("{}{}", self.base_url, path);
        Ok(client
            .request(method, &url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json"))
    }

    /// Send a power signal. Succeeds on any 2xx response.
    pub async fn send_power_signal(&self, server_id: &str, signal: PowerSignal) -> ClientResult<()> {
        let req = self
            .request(
                Method::POST,
                &format!("/api/client/servers/{}/power", server_id),
            )?
            .json(&PowerRequest { signal });

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::status(status.as_u16(), body));
        }

        Ok(())
    }

    /// Fetch the server's `current_state` from the resources endpoint
    pub async fn server_state(&self, server_id: &str) -> ClientResult<String> {
        let req = self.request(
            Method::GET,
            &format!("/api/client/servers/{}/resources", server_id),
        )?;

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), body));
        }

        let parsed: ResourcesResponse = serde_json::from_str(&body)?;
        Ok(parsed.attributes.current_state)
    }
}

#[async_trait]
impl PowerControl for PanelClient {
    async fn request_start(&self, server_id: &str) -> bool {
        match self.send_power_signal(server_id, PowerSignal::Start).await {
            Ok(()) => {
                info!("Start signal accepted for server {}", server_id);
                true
            }
            Err(e) => {
                error!("Start signal failed for server {}: {}", server_id, e);
                false
            }
        }
    }

    async fn request_stop(&self, server_id: &str) -> bool {
        match self.send_power_signal(server_id, PowerSignal::Stop).await {
            Ok(()) => {
                info!("Stop signal accepted for server {}", server_id);
                true
            }
            Err(e) => {
                error!("Stop signal failed for server {}: {}", server_id, e);
                false
            }
        }
    }

    async fn query_status(&self, server_id: &str) -> String {
        match self.server_state(server_id).await {
            Ok(state) => {
                debug!("Server {} reports state '{}'", server_id, state);
                state
            }
            Err(e) => {
                warn!("Status query failed for server {}: {}", server_id, e);
                OFFLINE_STATUS.to_string()
            }
        }
    }

    fn release(&self) {
        let released = self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match released {
            Some(client) => {
                drop(client);
                info!("Control API client released");
            }
            None => warn!("Control API client was already released"),
        }
    }
}
