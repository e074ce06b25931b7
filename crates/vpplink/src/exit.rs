use std::fmt;
use std::io;

use vpplink::api::ApiError;
use vpplink::compat::CompatError;
use vpplink::frame::FrameError;
use vpplink::transport::TransportError;
use vpplink::VppError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Connect { ref source, .. } => {
            // Keep the socket path in the message; io_error would drop it.
            let code = io_error(context, io::Error::from(source.kind())).code;
            CliError::new(code, format!("{context}: {err}"))
        }
        TransportError::Bind { source, .. }
        | TransportError::Accept(source)
        | TransportError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        FrameError::ConnectionClosed => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

pub fn api_error(context: &str, err: ApiError) -> CliError {
    match err {
        ApiError::Transport(err) => transport_error(context, err),
        ApiError::Frame(err) => frame_error(context, err),
        ApiError::Timeout(_) => CliError::new(TIMEOUT, format!("{context}: {err}")),
        ApiError::Disconnected(_) | ApiError::HandshakeFailed(_) => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
        ApiError::Decode { .. }
        | ApiError::UnexpectedReply { .. }
        | ApiError::UnknownMessage(_)
        | ApiError::UnknownMessageId(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        ApiError::Engine { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn compat_error(context: &str, err: CompatError) -> CliError {
    match err {
        CompatError::InvalidVersion { .. } | CompatError::InvalidConstraint { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        CompatError::LoadFailed(_) | CompatError::InvalidJson(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        CompatError::UnknownModule(_) | CompatError::Unsatisfied { .. } => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}

pub fn vpp_error(err: VppError) -> CliError {
    match err {
        VppError::Api { operation, source } => api_error(operation, source),
        VppError::Compat { operation, source } => compat_error(operation, source),
        VppError::InvalidInput { .. } => CliError::new(USAGE, err.to_string()),
        VppError::Engine { .. } => CliError::new(FAILURE, err.to_string()),
    }
}
