//! Error types for packet handling

use thiserror::Error;

/// Result type alias for packet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Packet error types
#[derive(Error, Debug)]
pub enum Error {
    /// Placeholder refers to a slot outside the attachment list
    #[error("illegal attachment reference: index {num}, {len} attachments")]
    IllegalAttachment { num: i64, len: usize },

    /// Binary frame arrived with no packet waiting for it
    #[error("unexpected binary attachment")]
    UnexpectedAttachment,

    /// Binary value left inline in a payload headed for a text encoding
    #[error("binary value must be deconstructed before text encoding")]
    InlineBinary,

    /// Invalid packet type code
    #[error("unknown packet type: {0}")]
    UnknownPacketType(u8),

    /// Streaming source failed while being drained
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text encoding error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Text decoding error
    #[error("decode error: {0}")]
    DecodeError(String),
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::DecodeError(e.to_string())
        } else {
            Error::EncodeError(e.to_string())
        }
    }
}

#[cfg(feature = "msgpack")]
impl From<rmp_serde::encode::Error> for Error {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Error::EncodeError(e.to_string())
    }
}

#[cfg(feature = "msgpack")]
impl From<rmp_serde::decode::Error> for Error {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Error::DecodeError(e.to_string())
    }
}
