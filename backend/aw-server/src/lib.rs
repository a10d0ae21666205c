//! aw-server
//!
//! Hosts the lifecycle orchestrator behind a small admin HTTP API.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    admin::{reload::reload_config, reload_response::ReloadResponse, shutdown::request_shutdown},
    connections::{
        connection_request::ConnectionRequest,
        connection_response::ConnectionResponse,
        connections::{create_connection, delete_connection},
    },
    error::ApiError,
    error::Result as ApiResult,
    status::{status::get_status, status_response::StatusResponse},
    timer::{timer::get_timer, timer_response::TimerResponse},
};
pub use app_state::{AppState, ConfigLoader};
pub use error::{Result as ServerResult, ServerError};

pub use crate::routes::build_router;
