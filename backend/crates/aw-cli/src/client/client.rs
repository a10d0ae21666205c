use crate::{CliClientResult, ClientError};

use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde_json::{Value, json};

/// HTTP client for the aw-server admin API
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Execute request and handle errors. An empty success body yields `null`;
    /// error bodies that are not JSON are kept as the message.
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Err(ClientError::from_response(status.as_u16(), &body, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lifecycle state plus live reachability and control API status
    pub async fn status(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/v1/status");
        self.execute(req).await
    }

    /// Auto-shutdown countdown
    pub async fn timer(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/v1/timer");
        self.execute(req).await
    }

    // =========================================================================
    // Admin commands
    // =========================================================================

    pub async fn shutdown(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/shutdown");
        self.execute(req).await
    }

    pub async fn reload(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/reload");
        self.execute(req).await
    }

    // =========================================================================
    // Client events
    // =========================================================================

    /// Report a connection attempt; returns the orchestrator's outcome
    pub async fn connect(&self, client_id: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct ConnectRequest<'a> {
            client_id: &'a str,
        }

        let req = self
            .request(Method::POST, "/api/v1/connections")
            .json(&ConnectRequest { client_id });
        self.execute(req).await
    }

    pub async fn disconnect(&self, client_id: &str) -> CliClientResult<Value> {
        let req = self.request(
            Method::DELETE,
            &format!("/api/v1/connections/{}", client_id),
        );
        self.execute(req).await?;
        Ok(json!({ "disconnected": client_id }))
    }
}
