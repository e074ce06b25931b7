use std::net::IpAddr;

use vpplink_api::binapi::ip_neighbor::IpNeighbor;

pub use vpplink_api::binapi::ip_neighbor::IpNeighborFlags as NeighborFlags;

use super::addr::{ip_from_wire, ip_to_wire, MacAddress};

/// An IP to MAC binding on an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub sw_if_index: u32,
    pub ip: IpAddr,
    pub mac: MacAddress,
    pub flags: NeighborFlags,
}

impl Neighbor {
    pub fn to_wire(&self) -> IpNeighbor {
        IpNeighbor {
            sw_if_index: self.sw_if_index,
            flags: self.flags,
            mac_address: self.mac.octets(),
            ip_address: ip_to_wire(self.ip),
        }
    }

    pub fn from_wire(neighbor: &IpNeighbor) -> Self {
        Self {
            sw_if_index: neighbor.sw_if_index,
            ip: ip_from_wire(&neighbor.ip_address),
            mac: MacAddress(neighbor.mac_address),
            flags: neighbor.flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_both_families() {
        for ip in ["10.0.0.2", "fd00::2"] {
            let neighbor = Neighbor {
                sw_if_index: 4,
                ip: ip.parse().unwrap(),
                mac: "02:00:00:00:00:2a".parse().unwrap(),
                flags: NeighborFlags::STATIC | NeighborFlags::NO_FIB_ENTRY,
            };
            assert_eq!(Neighbor::from_wire(&neighbor.to_wire()), neighbor);
        }
    }
}
