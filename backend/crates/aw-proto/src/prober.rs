use crate::{
    DEFAULT_PROTOCOL_VERSION, ProtocolResult, ReachabilityResult,
    packet::{Handshake, StatusResponse, encode_status_query, read_status_response},
    status_payload::player_count,
};

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Reachability checks the lifecycle orchestrator depends on.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// TCP check followed by a status query.
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ReachabilityResult;

    /// TCP-only check, for diagnostics.
    async fn can_connect(&self, host: &str, port: u16, timeout: Duration) -> bool;
}

/// Probes a game server over raw TCP.
#[derive(Debug, Clone, Copy)]
pub struct Prober {
    protocol_version: u32,
}

impl Prober {
    pub fn new(protocol_version: u32) -> Self {
        Self { protocol_version }
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    async fn connect(host: &str, port: u16, timeout: Duration) -> Option<TcpStream> {
        match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => Some(stream),
            Ok(Err(e)) => {
                debug!("TCP connect to {}:{} failed: {}", host, port, e);
                None
            }
            Err(_) => {
                debug!(
                    "TCP connect to {}:{} timed out after {}ms",
                    host,
                    port,
                    timeout.as_millis()
                );
                None
            }
        }
    }

    async fn exchange(
        &self,
        stream: &mut TcpStream,
        host: &str,
        port: u16,
    ) -> ProtocolResult<StatusResponse> {
        let query = encode_status_query(&Handshake {
            protocol_version: self.protocol_version,
            host,
            port,
        });

        stream.write_all(&query).await?;
        stream.flush().await?;

        read_status_response(stream).await
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(DEFAULT_PROTOCOL_VERSION)
    }
}

#[async_trait]
impl ReachabilityProbe for Prober {
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ReachabilityResult {
        let Some(mut stream) = Self::connect(host, port, timeout).await else {
            return ReachabilityResult::unreachable();
        };

        match tokio::time::timeout(timeout, self.exchange(&mut stream, host, port)).await {
            Ok(Ok(StatusResponse::Status { payload })) => ReachabilityResult {
                tcp_reachable: true,
                protocol_online: true,
                player_count: player_count(&payload),
            },
            Ok(Ok(StatusResponse::Other { packet_id })) => {
                debug!(
                    "{}:{} answered status request with packet id {:#04x}",
                    host, port, packet_id
                );
                ReachabilityResult {
                    tcp_reachable: true,
                    protocol_online: false,
                    player_count: None,
                }
            }
            Ok(Err(e)) => {
                debug!(
                    "Status query to {}:{} failed, assuming online: {}",
                    host, port, e
                );
                ReachabilityResult::assumed_online()
            }
            Err(_) => {
                debug!(
                    "Status query to {}:{} timed out, assuming online",
                    host, port
                );
                ReachabilityResult::assumed_online()
            }
        }
    }

    async fn can_connect(&self, host: &str, port: u16, timeout: Duration) -> bool {
        Self::connect(host, port, timeout).await.is_some()
    }
}
