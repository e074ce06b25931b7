//! Interface state, addressing and enumeration.

use super::ip_types::{AddressWithPrefix, InterfaceIndex, MacAddress};
use crate::wire::FixedStr;
use crate::{message, wire_enum, wire_flags};

wire_flags! {
    pub struct IfStatusFlags: u32 {
        const ADMIN_UP = 1;
        const LINK_UP = 2;
    }
}

wire_enum! {
    pub enum IfType: u32 {
        Hardware = 0,
        Sub = 1,
        P2p = 2,
        Pipe = 3,
    }
}

wire_enum! {
    pub enum RxMode: u32 {
        Unknown = 0,
        Polling = 1,
        Interrupt = 2,
        Adaptive = 3,
        Default = 4,
    }
}

message! {
    request SwInterfaceSetFlags("sw_interface_set_flags", "6a2b491a") -> SwInterfaceSetFlagsReply {
        pub sw_if_index: InterfaceIndex,
        pub flags: IfStatusFlags,
    }
}

message! {
    reply SwInterfaceSetFlagsReply("sw_interface_set_flags_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request SwInterfaceAddDelAddress("sw_interface_add_del_address", "5803d5c4") -> SwInterfaceAddDelAddressReply {
        pub sw_if_index: InterfaceIndex,
        pub is_add: bool,
        pub del_all: bool,
        pub prefix: AddressWithPrefix,
    }
}

message! {
    reply SwInterfaceAddDelAddressReply("sw_interface_add_del_address_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request SwInterfaceSetRxMode("sw_interface_set_rx_mode", "b04d1cfe") -> SwInterfaceSetRxModeReply {
        pub sw_if_index: InterfaceIndex,
        pub queue_id_valid: bool,
        pub queue_id: u32,
        pub mode: RxMode,
    }
}

message! {
    reply SwInterfaceSetRxModeReply("sw_interface_set_rx_mode_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request SwInterfaceSetRxPlacement("sw_interface_set_rx_placement", "db65f3c9") -> SwInterfaceSetRxPlacementReply {
        pub sw_if_index: InterfaceIndex,
        pub queue_id: u32,
        pub worker_id: u32,
        pub is_main: bool,
    }
}

message! {
    reply SwInterfaceSetRxPlacementReply("sw_interface_set_rx_placement_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request SwInterfaceSetUnnumbered("sw_interface_set_unnumbered", "154a6439") -> SwInterfaceSetUnnumberedReply {
        pub sw_if_index: InterfaceIndex,
        pub unnumbered_sw_if_index: InterfaceIndex,
        pub is_add: bool,
    }
}

message! {
    reply SwInterfaceSetUnnumberedReply("sw_interface_set_unnumbered_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    /// `sw_if_index == !0` dumps every interface.
    dump SwInterfaceDump("sw_interface_dump", "aa610c27") -> SwInterfaceDetails {
        pub sw_if_index: InterfaceIndex,
        pub name_filter_valid: bool,
        pub name_filter: String,
    }
}

message! {
    details SwInterfaceDetails("sw_interface_details", "17b69fa2") {
        pub sw_if_index: InterfaceIndex,
        pub sup_sw_if_index: InterfaceIndex,
        pub l2_address: MacAddress,
        pub flags: IfStatusFlags,
        pub if_type: IfType,
        pub link_speed: u32,
        pub link_mtu: u16,
        pub sub_id: u32,
        pub interface_name: FixedStr<64>,
        pub interface_dev_type: FixedStr<64>,
        pub tag: FixedStr<64>,
    }
}
