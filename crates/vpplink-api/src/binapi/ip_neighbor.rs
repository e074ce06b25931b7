use super::ip_types::{Address, AddressFamily, InterfaceIndex, MacAddress};
use crate::{message, wire_flags, wire_struct};

wire_flags! {
    pub struct IpNeighborFlags: u8 {
        const NONE = 0;
        const STATIC = 1;
        const NO_FIB_ENTRY = 2;
    }
}

wire_struct! {
    pub struct IpNeighbor {
        pub sw_if_index: InterfaceIndex,
        pub flags: IpNeighborFlags,
        pub mac_address: MacAddress,
        pub ip_address: Address,
    }
}

message! {
    request IpNeighborAddDel("ip_neighbor_add_del", "0607c257") -> IpNeighborAddDelReply {
        pub is_add: bool,
        pub neighbor: IpNeighbor,
    }
}

message! {
    reply IpNeighborAddDelReply("ip_neighbor_add_del_reply", "1992deab") {
        pub retval: i32,
        pub stats_index: u32,
    }
}

message! {
    dump IpNeighborDump("ip_neighbor_dump", "cd831298") -> IpNeighborDetails {
        pub sw_if_index: InterfaceIndex,
        pub af: AddressFamily,
    }
}

message! {
    details IpNeighborDetails("ip_neighbor_details", "e29d79f0") {
        pub age: f64,
        pub neighbor: IpNeighbor,
    }
}
