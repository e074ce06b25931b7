//! NAT44 endpoint-dependent plugin.

use super::ip_types::{InterfaceIndex, Ip4Address};
use crate::wire::FixedStr;
use crate::{message, wire_flags, wire_struct};

wire_flags! {
    pub struct NatConfigFlags: u8 {
        const NONE = 0;
        const TWICE_NAT = 1;
        const SELF_TWICE_NAT = 2;
        const OUT2IN_ONLY = 4;
        const ADDR_ONLY = 8;
        const OUTSIDE = 16;
        const INSIDE = 32;
        const STATIC = 64;
        const EXT_HOST_VALID = 128;
    }
}

message! {
    request Nat44ForwardingEnableDisable("nat44_forwarding_enable_disable", "b3e225d2") -> Nat44ForwardingEnableDisableReply {
        pub enable: bool,
    }
}

message! {
    reply Nat44ForwardingEnableDisableReply("nat44_forwarding_enable_disable_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request Nat44AddDelAddressRange("nat44_add_del_address_range", "6f2b8055") -> Nat44AddDelAddressRangeReply {
        pub first_ip_address: Ip4Address,
        pub last_ip_address: Ip4Address,
        pub vrf_id: u32,
        pub is_add: bool,
        pub flags: NatConfigFlags,
    }
}

message! {
    reply Nat44AddDelAddressRangeReply("nat44_add_del_address_range_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request Nat44AddDelInterfaceAddr("nat44_add_del_interface_addr", "4aed50c0") -> Nat44AddDelInterfaceAddrReply {
        pub is_add: bool,
        pub sw_if_index: InterfaceIndex,
        pub flags: NatConfigFlags,
    }
}

message! {
    reply Nat44AddDelInterfaceAddrReply("nat44_add_del_interface_addr_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request Nat44InterfaceAddDelFeature("nat44_interface_add_del_feature", "f3699b83") -> Nat44InterfaceAddDelFeatureReply {
        pub is_add: bool,
        pub flags: NatConfigFlags,
        pub sw_if_index: InterfaceIndex,
    }
}

message! {
    reply Nat44InterfaceAddDelFeatureReply("nat44_interface_add_del_feature_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request Nat44AddDelStaticMapping("nat44_add_del_static_mapping", "5ae5f03e") -> Nat44AddDelStaticMappingReply {
        pub is_add: bool,
        pub flags: NatConfigFlags,
        pub local_ip_address: Ip4Address,
        pub external_ip_address: Ip4Address,
        pub protocol: u8,
        pub local_port: u16,
        pub external_port: u16,
        pub external_sw_if_index: InterfaceIndex,
        pub vrf_id: u32,
        pub tag: FixedStr<64>,
    }
}

message! {
    reply Nat44AddDelStaticMappingReply("nat44_add_del_static_mapping_reply", "e8d4e804") {
        pub retval: i32,
    }
}

wire_struct! {
    pub struct Nat44LbAddrPort {
        pub addr: Ip4Address,
        pub port: u16,
        pub probability: u8,
        pub vrf_id: u32,
    }
}

message! {
    request Nat44AddDelLbStaticMapping("nat44_add_del_lb_static_mapping", "4f68ee9d") -> Nat44AddDelLbStaticMappingReply {
        pub is_add: bool,
        pub flags: NatConfigFlags,
        pub external_addr: Ip4Address,
        pub external_port: u16,
        pub protocol: u8,
        pub affinity: u32,
        pub tag: String,
        pub locals: Vec<Nat44LbAddrPort>,
    }
}

message! {
    reply Nat44AddDelLbStaticMappingReply("nat44_add_del_lb_static_mapping_reply", "e8d4e804") {
        pub retval: i32,
    }
}
