//! Domain values and their translation to and from wire bindings.

mod addr;
mod calico;
mod interface;
mod nat;
mod neigh;
mod route;
mod tap;

pub use addr::{
    ip_from_union, ip_from_wire, ip_to_union, ip_to_wire, IfAddress, IpPrefix, MacAddress,
};
pub use calico::{CalicoAs, CalicoVip, SnatEntry, VIP_FLOW_TABLE_LENGTH};
pub use interface::{InterfaceDetails, RxMode};
pub use nat::{IpProto, Nat44Entry, NatFlags};
pub use neigh::{Neighbor, NeighborFlags};
pub use route::Route;
pub use tap::TapV2;

/// A textual domain value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid prefix {input:?}: {reason}")]
    Prefix { input: String, reason: String },

    #[error("invalid MAC address {0:?}")]
    Mac(String),

    #[error("unknown protocol {0:?}")]
    Proto(String),
}
