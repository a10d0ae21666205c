//! Variable-length integer and length-prefixed string primitives.
//!
//! Integers are written 7 bits at a time, least significant group first,
//! with the high bit of every byte except the last set as a continuation
//! flag. A `u32` never needs more than [`MAX_VAR_INT_BYTES`] bytes.

use crate::{MAX_STRING_BYTES, ProtocolError, ProtocolResult};

use tokio::io::{AsyncRead, AsyncReadExt};

pub const MAX_VAR_INT_BYTES: usize = 5;

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;
const LAST_BYTE_OVERFLOW: u8 = 0x70;

/// Append the encoding of `value` to `buf`.
pub fn write_var_int(buf: &mut Vec<u8>, value: u32) {
    let mut remaining = value;
    loop {
        let segment = (remaining & SEGMENT_BITS as u32) as u8;
        remaining >>= 7;

        if remaining == 0 {
            buf.push(segment);
            return;
        }

        buf.push(segment | CONTINUE_BIT);
    }
}

/// Encode `value` into a fresh buffer.
pub fn encode(value: u32) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    write_var_int(&mut buf, value);
    buf
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

/// Decode one VarInt from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode(bytes: &[u8]) -> ProtocolResult<(u32, usize)> {
    let mut accumulator = Accumulator::default();

    for &byte in bytes {
        if let Some(value) = accumulator.push(byte)? {
            return Ok((value, accumulator.consumed));
        }
    }

    Err(ProtocolError::unexpected_eof("VarInt"))
}

/// Read one VarInt from an async stream.
pub async fn read_var_int<R>(reader: &mut R) -> ProtocolResult<u32>
where
    R: AsyncRead + Unpin,
{
    let mut accumulator = Accumulator::default();

    loop {
        let byte = reader
            .read_u8()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => ProtocolError::unexpected_eof("VarInt"),
                _ => ProtocolError::from(e),
            })?;

        if let Some(value) = accumulator.push(byte)? {
            return Ok(value);
        }
    }
}

/// Append a VarInt byte-length followed by the UTF-8 bytes of `value`.
pub fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_var_int(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}

/// Decode one length-prefixed string from the front of `bytes`.
pub fn decode_string(bytes: &[u8]) -> ProtocolResult<(String, usize)> {
    let (length, prefix_len) = decode(bytes)?;
    let length = checked_string_len(length)?;

    let end = prefix_len + length;
    let body = bytes
        .get(prefix_len..end)
        .ok_or_else(|| ProtocolError::unexpected_eof("string body"))?;

    let value = String::from_utf8(body.to_vec())?;
    Ok((value, end))
}

/// Read one length-prefixed string from an async stream.
pub async fn read_string<R>(reader: &mut R) -> ProtocolResult<String>
where
    R: AsyncRead + Unpin,
{
    let length = checked_string_len(read_var_int(reader).await?)?;

    let mut body = vec![0u8; length];
    reader
        .read_exact(&mut body)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtocolError::unexpected_eof("string body"),
            _ => ProtocolError::from(e),
        })?;

    Ok(String::from_utf8(body)?)
}

#[track_caller]
fn checked_string_len(length: u32) -> ProtocolResult<usize> {
    let length = length as usize;
    if length > MAX_STRING_BYTES {
        return Err(ProtocolError::string_too_long(length, MAX_STRING_BYTES));
    }
    Ok(length)
}

#[derive(Default)]
struct Accumulator {
    value: u32,
    consumed: usize,
}

impl Accumulator {
    /// Feed one byte. Yields the value once a byte without the continuation
    /// bit arrives.
    fn push(&mut self, byte: u8) -> ProtocolResult<Option<u32>> {
        // The last byte only has room for bits 28..=31
        if self.consumed == MAX_VAR_INT_BYTES - 1 && byte & LAST_BYTE_OVERFLOW != 0 {
            return Err(ProtocolError::var_int_too_long(MAX_VAR_INT_BYTES));
        }

        self.value |= ((byte & SEGMENT_BITS) as u32) << (7 * self.consumed);
        self.consumed += 1;

        if byte & CONTINUE_BIT == 0 {
            return Ok(Some(self.value));
        }

        if self.consumed == MAX_VAR_INT_BYTES {
            return Err(ProtocolError::var_int_too_long(MAX_VAR_INT_BYTES));
        }

        Ok(None)
    }
}
