use std::time::Duration;

use bytes::Bytes;

use crate::message::Message;
use crate::wire::WireError;

/// Errors raised by the exchange protocol and the channels beneath it.
///
/// Everything except [`ApiError::Engine`] is a transport-class failure: the
/// exchange did not produce a usable reply.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] vpplink_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] vpplink_frame::FrameError),

    /// A request body could not be encoded.
    #[error("failed to encode {message}: {source}")]
    Encode {
        message: String,
        #[source]
        source: WireError,
    },

    /// A reply or detail body could not be decoded.
    #[error("failed to decode {message}: {source}")]
    Decode {
        message: String,
        #[source]
        source: WireError,
    },

    /// The engine answered with a message other than the one expected.
    #[error("unexpected reply: expected {expected}, received {received}")]
    UnexpectedReply { expected: String, received: String },

    /// The engine does not know the message (name or CRC mismatch).
    #[error("message {0} is not in the engine message table")]
    UnknownMessage(String),

    /// The engine sent a message id absent from its own table.
    #[error("received unknown message id {0}")]
    UnknownMessageId(u16),

    /// The connection is gone.
    #[error("disconnected: {0}")]
    Disconnected(String),

    /// No reply arrived within the configured wait.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// The socket client registration failed.
    #[error("handshake failed: {0}")]
    HandshakeFailed(String),

    /// A compiled-in binding is malformed.
    #[error("invalid binding: {0}")]
    InvalidBinding(String),

    /// The engine decoded the request and reported a non-zero result code.
    /// `payload` is the reply body, for callers that need partial data.
    #[error("{message} returned retval {retval}")]
    Engine {
        message: &'static str,
        retval: i32,
        payload: Bytes,
    },
}

impl ApiError {
    /// True for engine-reported failures, false for transport-class ones.
    pub fn is_engine(&self) -> bool {
        matches!(self, ApiError::Engine { .. })
    }

    /// Engine result code, if this is an engine failure.
    pub fn retval(&self) -> Option<i32> {
        match self {
            ApiError::Engine { retval, .. } => Some(*retval),
            _ => None,
        }
    }

    /// Decode the reply carried by an engine failure.
    pub fn engine_reply<R: Message>(&self) -> Option<R> {
        match self {
            ApiError::Engine {
                message, payload, ..
            } if *message == R::NAME => R::decode(&mut payload.clone()).ok(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Timeout(_) => true,
            ApiError::Frame(err) => err.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
