use super::ip_types::{AddressWithPrefix, InterfaceIndex, MacAddress};
use crate::wire::FixedStr;
use crate::{message, wire_flags};

wire_flags! {
    pub struct TapFlags: u32 {
        const GSO = 1;
        const CSUM_OFFLOAD = 2;
        const PERSIST = 4;
        const ATTACH = 8;
        const TUN = 16;
        const GRO_COALESCE = 32;
        const PACKED = 64;
        const IN_ORDER = 128;
    }
}

message! {
    /// `id == !0` lets the engine pick the device instance.
    request TapCreateV2("tap_create_v2", "2d0d6570") -> TapCreateV2Reply {
        pub id: u32,
        pub use_random_mac: bool,
        pub mac_address: MacAddress,
        pub num_rx_queues: u8,
        pub tx_ring_sz: u16,
        pub rx_ring_sz: u16,
        pub host_mtu_set: bool,
        pub host_mtu_size: u32,
        pub host_mac_addr_set: bool,
        pub host_mac_addr: MacAddress,
        pub host_ip4_prefix_set: bool,
        pub host_ip4_prefix: AddressWithPrefix,
        pub host_ip6_prefix_set: bool,
        pub host_ip6_prefix: AddressWithPrefix,
        pub host_namespace_set: bool,
        pub host_namespace: FixedStr<64>,
        pub host_if_name_set: bool,
        pub host_if_name: FixedStr<64>,
        pub tap_flags: TapFlags,
        pub tag: FixedStr<64>,
    }
}

message! {
    reply TapCreateV2Reply("tap_create_v2_reply", "5383d31f") {
        pub retval: i32,
        pub sw_if_index: InterfaceIndex,
    }
}

message! {
    request TapDeleteV2("tap_delete_v2", "f9e6675e") -> TapDeleteV2Reply {
        pub sw_if_index: InterfaceIndex,
    }
}

message! {
    reply TapDeleteV2Reply("tap_delete_v2_reply", "e8d4e804") {
        pub retval: i32,
    }
}
