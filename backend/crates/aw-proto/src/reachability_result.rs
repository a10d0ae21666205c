use serde::Serialize;

/// Outcome of one reachability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReachabilityResult {
    /// A TCP connection to the target succeeded
    pub tcp_reachable: bool,
    /// The target answered the status query, or could not be queried but
    /// accepted TCP (assumed online)
    pub protocol_online: bool,
    /// Players online, when the status payload reported it
    pub player_count: Option<u32>,
}

impl ReachabilityResult {
    /// Nothing accepted the connection. The usual "server is off" answer.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// TCP succeeded but the status exchange could not be completed.
    pub fn assumed_online() -> Self {
        Self {
            tcp_reachable: true,
            protocol_online: true,
            player_count: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.tcp_reachable && self.protocol_online
    }
}
