//! Socket transport for the engine binary API.
//!
//! The engine exposes its API on a Unix domain socket (by default
//! `/run/vpp/api.sock`). This crate owns nothing but the byte stream:
//! connecting, timeouts, and shutdown. Framing lives in `vpplink-frame`,
//! message correlation in `vpplink-api`.

pub mod error;
#[cfg(unix)]
pub mod stream;

#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};
#[cfg(unix)]
pub use stream::ApiStream;

#[cfg(unix)]
pub use uds::{UnixDomainSocket, DEFAULT_API_SOCKET};
