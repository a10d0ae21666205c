//! aw-proto
//!
//! Minimal game-server status protocol: VarInt codec, the handshake and
//! status-request packets, and a prober that turns one exchange into a
//! [`ReachabilityResult`].

pub mod error;
pub mod packet;
pub mod prober;
pub mod reachability_result;
pub mod status_payload;
pub mod var_int;


pub use error::{ProtocolError, Result as ProtocolResult};
pub use packet::{Handshake, StatusResponse};
pub use prober::{Prober, ReachabilityProbe};
pub use reachability_result::ReachabilityResult;
pub use status_payload::{StatusPayload, player_count};

/// Protocol version sent in the handshake (1.8.x). Status queries are
/// answered regardless of the version a client announces.
pub const DEFAULT_PROTOCOL_VERSION: u32 = 47;

pub const HANDSHAKE_PACKET_ID: u32 = 0x00;
pub const STATUS_REQUEST_PACKET_ID: u32 = 0x00;
pub const STATUS_RESPONSE_PACKET_ID: u32 = 0x00;

/// Next-state value selecting the status state in a handshake.
pub const NEXT_STATE_STATUS: u32 = 1;

/// Upper bound on a decoded string: 32767 UTF-16 code units, up to four
/// bytes each.
pub const MAX_STRING_BYTES: usize = 32767 * 4;
