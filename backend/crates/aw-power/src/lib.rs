//! aw-power
//!
//! Power control for the managed server: the [`PowerControl`] interface the
//! lifecycle orchestrator consumes, and [`PanelClient`], its implementation
//! over a Pterodactyl-style client API.

pub mod error;
pub mod panel_client;
pub mod power_control;
pub mod power_signal;


pub use error::{ClientError, Result as ClientResult};
pub use panel_client::PanelClient;
pub use power_control::PowerControl;
pub use power_signal::PowerSignal;

/// Status label meaning "confirmed offline". Any other label only means
/// "not confirmed offline".
pub const OFFLINE_STATUS: &str = "offline";
