#![allow(dead_code)]

//! Test infrastructure for aw-server API tests

use aw_core::{
    ChannelNotificationSink, CoreError, Notification, Orchestrator, PowerConfig,
    ShutdownCoordinator,
};
use aw_power::PowerControl;
use aw_proto::{ReachabilityProbe, ReachabilityResult};
use aw_server::{AppState, ConfigLoader, ServerError};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tokio::sync::mpsc;

/// Probe that always answers with the same result
pub struct StaticProbe {
    pub result: Mutex<ReachabilityResult>,
}

impl StaticProbe {
    pub fn new(result: ReachabilityResult) -> Arc<Self> {
        Arc::new(Self {
            result: Mutex::new(result),
        })
    }
}

#[async_trait]
impl ReachabilityProbe for StaticProbe {
    async fn probe(&self, _host: &str, _port: u16, _timeout: Duration) -> ReachabilityResult {
        *self.result.lock().unwrap()
    }

    async fn can_connect(&self, _host: &str, _port: u16, _timeout: Duration) -> bool {
        self.result.lock().unwrap().tcp_reachable
    }
}

/// Control API double that accepts every signal
#[derive(Default)]
pub struct CountingPower {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
}

#[async_trait]
impl PowerControl for CountingPower {
    async fn request_start(&self, _server_id: &str) -> bool {
        self.starts.fetch_add(1, Ordering::SeqCst);
        true
    }

    async fn request_stop(&self, _server_id: &str) -> bool {
        self.stops.fetch_add(1, Ordering::SeqCst);
        true
    }

    async fn query_status(&self, _server_id: &str) -> String {
        "running".to_string()
    }

    fn release(&self) {}
}

pub fn online(players: Option<u32>) -> ReachabilityResult {
    ReachabilityResult {
        tcp_reachable: true,
        protocol_online: true,
        player_count: players,
    }
}

pub fn offline() -> ReachabilityResult {
    ReachabilityResult::unreachable()
}

pub fn test_power_config() -> PowerConfig {
    PowerConfig {
        control_endpoint: "https://panel.example.com".to_string(),
        credentials: "ptlc_test".to_string(),
        server_id: "1a7ce997".to_string(),
        auto_shutdown_enabled: true,
        ..PowerConfig::default()
    }
}

/// Loader returning `test_power_config()` with auto-shutdown toggled
pub fn loader_with(auto_shutdown_enabled: bool) -> ConfigLoader {
    Arc::new(move || {
        Ok(PowerConfig {
            auto_shutdown_enabled,
            ..test_power_config()
        })
    })
}

/// Loader that always fails validation
pub fn failing_loader() -> ConfigLoader {
    Arc::new(|| {
        Err(ServerError::Core(CoreError::config(
            "target port must not be 0",
        )))
    })
}

pub struct TestApp {
    pub state: AppState,
    pub power: Arc<CountingPower>,
    pub notifications: mpsc::Receiver<Notification>,
}

/// Create AppState for testing
pub fn create_test_app(result: ReachabilityResult, config_loader: ConfigLoader) -> TestApp {
    let power = Arc::new(CountingPower::default());
    let (sink, notifications) = ChannelNotificationSink::channel(64);
    let orchestrator = Orchestrator::new(
        test_power_config(),
        StaticProbe::new(result),
        power.clone(),
        Arc::new(sink),
    );

    TestApp {
        state: AppState {
            orchestrator,
            shutdown: ShutdownCoordinator::new(),
            config_loader,
        },
        power,
        notifications,
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
