use crate::ClientId;

use std::fmt;

/// Event emitted to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    /// `None` for events about the server as a whole
    pub target_client: Option<ClientId>,
}

impl Notification {
    pub fn broadcast(kind: NotificationKind) -> Self {
        Self {
            kind,
            target_client: None,
        }
    }

    pub fn to_client(kind: NotificationKind, client: ClientId) -> Self {
        Self {
            kind,
            target_client: Some(client),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Starting,
    StartupInProgress,
    Started,
    StartFailed,
    TimedOut,
    StartupAbandoned,
    EmptyTimerStarted,
    EmptyTimerCleared,
    StillCountingDown { seconds_remaining: u64 },
    ShuttingDown,
    StopSucceeded,
    StopFailed,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "Server is starting, please wait"),
            Self::StartupInProgress => write!(f, "Server is already starting, please wait"),
            Self::Started => write!(f, "Server is online, you can connect now"),
            Self::StartFailed => write!(f, "Server could not be started"),
            Self::TimedOut => write!(f, "Server did not come online in time"),
            Self::StartupAbandoned => write!(f, "Startup abandoned, nobody is waiting"),
            Self::EmptyTimerStarted => write!(f, "Server is empty, auto-shutdown countdown started"),
            Self::EmptyTimerCleared => write!(f, "Players are back, auto-shutdown cancelled"),
            Self::StillCountingDown { seconds_remaining } => {
                write!(f, "Server empty, shutting down in {}s", seconds_remaining)
            }
            Self::ShuttingDown => write!(f, "Server is shutting down"),
            Self::StopSucceeded => write!(f, "Server stopped"),
            Self::StopFailed => write!(f, "Server could not be stopped"),
        }
    }
}
