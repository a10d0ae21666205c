//! Status-query packets: the handshake that switches the connection into the
//! status state, the empty status request, and the status response.

use crate::{
    HANDSHAKE_PACKET_ID, NEXT_STATE_STATUS, ProtocolResult, STATUS_REQUEST_PACKET_ID,
    STATUS_RESPONSE_PACKET_ID,
    var_int::{read_string, read_var_int, write_string, write_var_int},
};

use tokio::io::AsyncRead;

/// Handshake announcing the intent to query status.
#[derive(Debug, Clone, Copy)]
pub struct Handshake<'a> {
    pub protocol_version: u32,
    pub host: &'a str,
    pub port: u16,
}

impl Handshake<'_> {
    /// Packet body without the outer length prefix.
    pub fn encode_body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.host.len() + 16);
        write_var_int(&mut body, HANDSHAKE_PACKET_ID);
        write_var_int(&mut body, self.protocol_version);
        write_string(&mut body, self.host);
        body.extend_from_slice(&self.port.to_be_bytes());
        write_var_int(&mut body, NEXT_STATE_STATUS);
        body
    }
}

/// Prefix `body` with its VarInt length.
pub fn frame(body: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(body.len() + 5);
    write_var_int(&mut framed, body.len() as u32);
    framed.extend_from_slice(body);
    framed
}

/// The framed status request (packet id only, no payload).
pub fn status_request_frame() -> Vec<u8> {
    let mut body = Vec::with_capacity(1);
    write_var_int(&mut body, STATUS_REQUEST_PACKET_ID);
    frame(&body)
}

/// Both frames a status query sends, concatenated in send order.
pub fn encode_status_query(handshake: &Handshake<'_>) -> Vec<u8> {
    let mut out = frame(&handshake.encode_body());
    out.extend_from_slice(&status_request_frame());
    out
}

/// What came back after a status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusResponse {
    /// A status packet carrying the JSON-like payload.
    Status { payload: String },
    /// Some other packet; the listener speaks the protocol but did not answer
    /// with a status.
    Other { packet_id: u32 },
}

/// Read one response packet from `reader`.
pub async fn read_status_response<R>(reader: &mut R) -> ProtocolResult<StatusResponse>
where
    R: AsyncRead + Unpin,
{
    let _length = read_var_int(reader).await?;
    let packet_id = read_var_int(reader).await?;

    if packet_id != STATUS_RESPONSE_PACKET_ID {
        return Ok(StatusResponse::Other { packet_id });
    }

    let payload = read_string(reader).await?;
    Ok(StatusResponse::Status { payload })
}
