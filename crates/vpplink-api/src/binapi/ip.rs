//! FIB routes, interface addresses and punt redirection.

use super::ip_types::{Address, AddressUnion, AddressWithPrefix, InterfaceIndex, Prefix};
use crate::wire::FixedStr;
use crate::{message, wire_enum, wire_flags, wire_struct};

wire_enum! {
    pub enum FibPathNhProto: u32 {
        Ip4 = 0,
        Ip6 = 1,
        Mpls = 2,
        Ethernet = 3,
        Bier = 4,
    }
}

wire_enum! {
    pub enum FibPathType: u32 {
        Normal = 0,
        Local = 1,
        Drop = 2,
        UdpEncap = 3,
        BierImp = 4,
        IcmpUnreach = 5,
        IcmpProhibit = 6,
        SourceLookup = 7,
        Dvr = 8,
        InterfaceRx = 9,
        Classify = 10,
    }
}

wire_flags! {
    pub struct FibPathFlags: u32 {
        const NONE = 0;
        const RESOLVE_VIA_ATTACHED = 1;
        const RESOLVE_VIA_HOST = 2;
        const POP_PW_CW = 4;
    }
}

wire_struct! {
    pub struct FibPathNh {
        pub address: AddressUnion,
        pub via_label: u32,
        pub obj_id: u32,
        pub classify_table_index: u32,
    }
}

wire_struct! {
    pub struct FibPath {
        pub sw_if_index: InterfaceIndex,
        pub table_id: u32,
        pub rpf_id: u32,
        pub weight: u8,
        pub preference: u8,
        pub path_type: FibPathType,
        pub flags: FibPathFlags,
        pub proto: FibPathNhProto,
        pub nh: FibPathNh,
    }
}

wire_struct! {
    pub struct IpRoute {
        pub table_id: u32,
        pub stats_index: u32,
        pub prefix: Prefix,
        pub paths: Vec<FibPath>,
    }
}

wire_struct! {
    pub struct IpTable {
        pub table_id: u32,
        pub is_ip6: bool,
        pub name: FixedStr<64>,
    }
}

message! {
    request IpRouteAddDel("ip_route_add_del", "c1ff832d") -> IpRouteAddDelReply {
        pub is_add: bool,
        pub is_multipath: bool,
        pub route: IpRoute,
    }
}

message! {
    reply IpRouteAddDelReply("ip_route_add_del_reply", "1992deab") {
        pub retval: i32,
        pub stats_index: u32,
    }
}

message! {
    dump IpRouteDump("ip_route_dump", "b9d2e09e") -> IpRouteDetails {
        pub table: IpTable,
    }
}

message! {
    details IpRouteDetails("ip_route_details", "bda8f315") {
        pub route: IpRoute,
    }
}

message! {
    request SwInterfaceIp6EnableDisable("sw_interface_ip6_enable_disable", "ae6cfcfb") -> SwInterfaceIp6EnableDisableReply {
        pub sw_if_index: InterfaceIndex,
        pub enable: bool,
    }
}

message! {
    reply SwInterfaceIp6EnableDisableReply("sw_interface_ip6_enable_disable_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    dump IpAddressDump("ip_address_dump", "2d033de4") -> IpAddressDetails {
        pub sw_if_index: InterfaceIndex,
        pub is_ipv6: bool,
    }
}

message! {
    details IpAddressDetails("ip_address_details", "b1199745") {
        pub sw_if_index: InterfaceIndex,
        pub prefix: AddressWithPrefix,
    }
}

wire_struct! {
    pub struct PuntRedirect {
        pub rx_sw_if_index: InterfaceIndex,
        pub tx_sw_if_index: InterfaceIndex,
        pub nh: Address,
    }
}

message! {
    request IpPuntRedirect("ip_punt_redirect", "a9a5592c") -> IpPuntRedirectReply {
        pub punt: PuntRedirect,
        pub is_add: bool,
    }
}

message! {
    reply IpPuntRedirectReply("ip_punt_redirect_reply", "e8d4e804") {
        pub retval: i32,
    }
}
