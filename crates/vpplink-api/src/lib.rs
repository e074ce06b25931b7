//! Client side of the engine binary API.
//!
//! Messages are identified by `(name, crc)`; the numeric id used on the wire
//! is learned per connection from the engine's message table
//! ([`Catalogue`]). Requests go out through a [`Channel`]; [`execute`] runs
//! a unary exchange and [`stream`] runs a dump whose details are pulled
//! lazily through a [`DumpStream`].
//!
//! ```no_run
//! use vpplink_api::binapi::vpe::ShowVersion;
//! use vpplink_api::{execute, ChannelConfig, SocketChannel};
//!
//! # fn main() -> vpplink_api::Result<()> {
//! let mut channel = SocketChannel::connect(&ChannelConfig::default())?;
//! let reply = execute(&mut channel, &ShowVersion::default())?;
//! println!("{}", reply.version);
//! # Ok(())
//! # }
//! ```

pub mod binapi;
pub mod catalogue;
pub mod channel;
pub mod config;
pub mod error;
pub mod exchange;
pub mod handshake;
pub mod header;
mod macros;
pub mod message;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod socket;
pub mod wire;

pub use binapi::{check_bindings, BINAPI_VERSION, INVALID_SW_IF_INDEX};
pub use catalogue::Catalogue;
pub use channel::{Channel, Received, RequestContext};
pub use config::ChannelConfig;
pub use error::{ApiError, Result};
pub use exchange::{execute, execute_unchecked, stream, DumpStream};
pub use message::{Dump, Message, MessageIdentity, MessageKind, RawMessage, Reply, Request};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockChannel, MockLog};
pub use socket::SocketChannel;
pub use wire::{Decode, Encode, FixedStr, WireError};
