//! Calico service load-balancing plugin.

use super::ip_types::{Address, AddressWithPrefix, InterfaceIndex};
use crate::{message, wire_enum};

wire_enum! {
    pub enum CalicoEncapType: u8 {
        Nat4 = 0,
        Nat6 = 1,
    }
}

message! {
    request CalicoAddDelIntfNat4("calico_add_del_intf_nat4", "47d6e753") -> CalicoAddDelIntfNat4Reply {
        pub is_add: bool,
        pub sw_if_index: InterfaceIndex,
    }
}

message! {
    reply CalicoAddDelIntfNat4Reply("calico_add_del_intf_nat4_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request CalicoAddDelIntfNat6("calico_add_del_intf_nat6", "47d6e753") -> CalicoAddDelIntfNat6Reply {
        pub is_add: bool,
        pub sw_if_index: InterfaceIndex,
    }
}

message! {
    reply CalicoAddDelIntfNat6Reply("calico_add_del_intf_nat6_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    /// Adds or removes one backend ("application server") of a VIP.
    request CalicoAddDelAs("calico_add_del_as", "35b5a3e6") -> CalicoAddDelAsReply {
        pub pfx: AddressWithPrefix,
        pub protocol: u8,
        pub port: u16,
        pub as_address: Address,
        pub is_del: bool,
        pub is_flush: bool,
    }
}

message! {
    reply CalicoAddDelAsReply("calico_add_del_as_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request CalicoAddDelVip("calico_add_del_vip", "d4a3b5c2") -> CalicoAddDelVipReply {
        pub pfx: AddressWithPrefix,
        pub protocol: u8,
        pub port: u16,
        pub encap: CalicoEncapType,
        pub target_port: u16,
        pub new_flows_table_length: u32,
        pub is_del: bool,
    }
}

message! {
    reply CalicoAddDelVipReply("calico_add_del_vip_reply", "e8d4e804") {
        pub retval: i32,
    }
}

message! {
    request CalicoAddDelSnatEntry("calico_add_del_snat_entry", "a2e6b8f1") -> CalicoAddDelSnatEntryReply {
        pub pfx: AddressWithPrefix,
        pub addr: Address,
        pub table_id: u32,
        pub is_add: bool,
    }
}

message! {
    reply CalicoAddDelSnatEntryReply("calico_add_del_snat_entry_reply", "e8d4e804") {
        pub retval: i32,
    }
}
