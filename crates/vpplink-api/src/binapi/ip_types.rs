//! Address types shared by the `ip`, `ip_neighbor`, `interface`, `nat` and
//! `calico` modules.

use crate::{wire_enum, wire_struct};

wire_enum! {
    pub enum AddressFamily: u8 {
        Ip4 = 0,
        Ip6 = 1,
    }
}

wire_enum! {
    /// IANA protocol numbers accepted by the engine.
    pub enum IpProto: u8 {
        Hopopt = 0,
        Icmp = 1,
        Igmp = 2,
        Tcp = 6,
        Udp = 17,
        Gre = 47,
        Esp = 50,
        Ah = 51,
        Icmp6 = 58,
        Eigrp = 88,
        Ospf = 89,
        Sctp = 132,
        Reserved = 255,
    }
}

/// IPv4 bytes in a 16-byte union occupy the first four bytes.
pub type AddressUnion = [u8; 16];
pub type Ip4Address = [u8; 4];
pub type MacAddress = [u8; 6];
pub type InterfaceIndex = u32;

wire_struct! {
    pub struct Address {
        pub af: AddressFamily,
        pub un: AddressUnion,
    }
}

wire_struct! {
    pub struct Prefix {
        pub address: Address,
        pub len: u8,
    }
}

/// An interface address: host bits are significant.
pub type AddressWithPrefix = Prefix;
