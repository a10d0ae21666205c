//! aw-core
//!
//! The lifecycle orchestrator that powers a managed game server on when a
//! client tries to connect and off again after it has been empty for a while.

pub mod client_id;
pub mod connection_outcome;
pub mod countdown;
pub mod error;
pub mod lifecycle_state;
pub mod notification;
pub mod notification_sink;
pub mod orchestrator;
pub mod power_config;
pub mod scheduler;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod status_report;

#[cfg(test)]
mod tests;

pub use client_id::ClientId;
pub use connection_outcome::{ConnectionOutcome, ShutdownRequestOutcome};
pub use countdown::Countdown;
pub use error::{CoreError, Result as CoreResult};
pub use lifecycle_state::LifecycleState;
pub use notification::{Notification, NotificationKind};
pub use notification_sink::{
    ChannelNotificationSink, FanoutNotificationSink, LogNotificationSink, NotificationSink,
};
pub use orchestrator::Orchestrator;
pub use power_config::PowerConfig;
pub use scheduler::{Scheduler, TimerKind};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use status_report::StatusReport;
