//! Serialized control-plane client for the VPP binary API.
//!
//! [`VppLink`] wraps one engine connection behind a lock and exposes the
//! control plane as blocking domain verbs: TAP and interface lifecycle,
//! addresses, routes and neighbors, NAT44 service mappings, the Calico
//! service plugin, and engine metadata.
//!
//! ```no_run
//! use vpplink::{ChannelConfig, VppLink};
//!
//! # fn main() -> vpplink::Result<()> {
//! let link = VppLink::connect(&ChannelConfig::default())?;
//! link.require("interface", ">=3.0.0, <4.0.0")?;
//! for iface in link.dump_interfaces()? {
//!     println!("{} {}", iface.sw_if_index, iface.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Structure
//!
//! - [`transport`]: Engine API socket
//! - [`frame`]: Socket frame codec
//! - [`api`]: Exchange protocol, channels and message bindings
//! - [`compat`]: API module version checks
//! - [`types`]: Domain values and their wire translation

mod calico;
mod engine;
pub mod error;
mod interfaces;
mod link;
mod nat44;
mod routes;
pub mod types;

/// Re-export transport types.
pub mod transport {
    pub use vpplink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use vpplink_frame::*;
}

/// Re-export exchange protocol types.
pub mod api {
    pub use vpplink_api::*;
}

/// Re-export compatibility gate types.
pub mod compat {
    pub use vpplink_compat::*;
}

pub use engine::EngineVersion;
pub use error::{Result, VppError};
pub use interfaces::RETVAL_DEVICE_BUSY;
pub use link::VppLink;
pub use nat44::LB_BACKEND_PROBABILITY;
pub use vpplink_api::{Channel, ChannelConfig, SocketChannel, INVALID_SW_IF_INDEX};
