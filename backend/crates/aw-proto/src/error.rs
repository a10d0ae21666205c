use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised while encoding or decoding status-query wire data.
///
/// None of these are fatal to the caller: the prober degrades every one of
/// them to "reachable, player count unknown".
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("VarInt is longer than {max_bytes} bytes {location}")]
    VarIntTooLong {
        max_bytes: usize,
        location: ErrorLocation,
    },

    #[error("Unexpected end of stream while reading {context} {location}")]
    UnexpectedEof {
        context: &'static str,
        location: ErrorLocation,
    },

    #[error("String length {length} exceeds maximum of {max} bytes {location}")]
    StringTooLong {
        length: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid UTF-8 in string field: {source} {location}")]
    InvalidUtf8 {
        #[source]
        source: std::string::FromUtf8Error,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl ProtocolError {
    #[track_caller]
    pub fn var_int_too_long(max_bytes: usize) -> Self {
        ProtocolError::VarIntTooLong {
            max_bytes,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unexpected_eof(context: &'static str) -> Self {
        ProtocolError::UnexpectedEof {
            context,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn string_too_long(length: usize, max: usize) -> Self {
        ProtocolError::StringTooLong {
            length,
            max,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for ProtocolError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            return ProtocolError::unexpected_eof("stream");
        }

        ProtocolError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::string::FromUtf8Error> for ProtocolError {
    #[track_caller]
    fn from(source: std::string::FromUtf8Error) -> Self {
        ProtocolError::InvalidUtf8 {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
