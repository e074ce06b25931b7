use std::net::IpAddr;

use vpplink_api::binapi::calico::{
    CalicoAddDelAs, CalicoAddDelSnatEntry, CalicoAddDelVip, CalicoEncapType,
};
use vpplink_api::binapi::ip_types::IpProto;

use super::addr::{ip_to_wire, IpPrefix};

/// Flow table size requested for every VIP.
pub const VIP_FLOW_TABLE_LENGTH: u32 = 1024;

/// A load-balanced virtual IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalicoVip {
    pub prefix: IpPrefix,
    pub port: u16,
    pub target_port: u16,
    /// Rewrite towards IPv6 backends.
    pub encap_v6: bool,
}

impl CalicoVip {
    pub fn to_wire(&self, is_add: bool) -> CalicoAddDelVip {
        CalicoAddDelVip {
            pfx: self.prefix.to_wire(),
            protocol: IpProto::Tcp as u8,
            port: self.port,
            encap: if self.encap_v6 {
                CalicoEncapType::Nat6
            } else {
                CalicoEncapType::Nat4
            },
            target_port: self.target_port,
            new_flows_table_length: VIP_FLOW_TABLE_LENGTH,
            is_del: !is_add,
        }
    }
}

/// One backend of a [`CalicoVip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalicoAs {
    pub vip: IpPrefix,
    pub port: u16,
    pub address: IpAddr,
}

impl CalicoAs {
    pub fn to_wire(&self, is_add: bool) -> CalicoAddDelAs {
        CalicoAddDelAs {
            pfx: self.vip.to_wire(),
            protocol: IpProto::Tcp as u8,
            port: self.port,
            as_address: ip_to_wire(self.address),
            is_del: !is_add,
            is_flush: false,
        }
    }
}

/// Source NAT for traffic from `prefix`, rewritten to `addr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnatEntry {
    pub prefix: IpPrefix,
    pub addr: IpAddr,
    pub table_id: u32,
}

impl SnatEntry {
    pub fn to_wire(&self, is_add: bool) -> CalicoAddDelSnatEntry {
        CalicoAddDelSnatEntry {
            pfx: self.prefix.to_wire(),
            addr: ip_to_wire(self.addr),
            table_id: self.table_id,
            is_add,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vip_encap_and_constants() {
        let vip = CalicoVip {
            prefix: "10.96.0.1/32".parse().unwrap(),
            port: 80,
            target_port: 8080,
            encap_v6: true,
        };
        let wire = vip.to_wire(true);
        assert_eq!(wire.encap, CalicoEncapType::Nat6);
        assert_eq!(wire.protocol, 6);
        assert_eq!(wire.new_flows_table_length, 1024);
        assert!(!wire.is_del);

        let wire = CalicoVip {
            encap_v6: false,
            ..vip
        }
        .to_wire(false);
        assert_eq!(wire.encap, CalicoEncapType::Nat4);
        assert!(wire.is_del);
    }

    #[test]
    fn backend_is_never_flushed() {
        let backend = CalicoAs {
            vip: "10.96.0.1/32".parse().unwrap(),
            port: 80,
            address: "10.0.0.7".parse().unwrap(),
        };
        let wire = backend.to_wire(false);
        assert!(wire.is_del);
        assert!(!wire.is_flush);
        assert_eq!(wire.as_address.un[..4], [10, 0, 0, 7]);
    }
}
