//! NAT44 verbs.

use std::net::Ipv4Addr;

use tracing::debug;
use vpplink_api::binapi::nat::{
    Nat44AddDelAddressRange, Nat44AddDelInterfaceAddr, Nat44AddDelLbStaticMapping,
    Nat44AddDelStaticMapping, Nat44ForwardingEnableDisable, Nat44InterfaceAddDelFeature,
    Nat44LbAddrPort,
};
use vpplink_api::{Channel, INVALID_SW_IF_INDEX};

use crate::error::{Result, VppError};
use crate::link::VppLink;
use crate::types::{Nat44Entry, NatFlags};

/// Relative weight given to every backend of a load-balanced mapping.
pub const LB_BACKEND_PROBABILITY: u8 = 10;

/// Flags applied to every service mapping.
const SERVICE_FLAGS: NatFlags = NatFlags(NatFlags::SELF_TWICE_NAT.0 | NatFlags::OUT2IN_ONLY.0);

impl<C: Channel> VppLink<C> {
    pub fn enable_nat_forwarding(&self) -> Result<()> {
        self.call(
            "enable_nat_forwarding",
            &Nat44ForwardingEnableDisable { enable: true },
            || "forwarding".to_string(),
        )?;
        Ok(())
    }

    /// Add `address` to the NAT44 pool.
    pub fn add_nat44_address(&self, address: Ipv4Addr) -> Result<()> {
        self.add_del_nat44_address("add_nat44_address", address, true)
    }

    pub fn del_nat44_address(&self, address: Ipv4Addr) -> Result<()> {
        self.add_del_nat44_address("del_nat44_address", address, false)
    }

    fn add_del_nat44_address(
        &self,
        operation: &'static str,
        address: Ipv4Addr,
        is_add: bool,
    ) -> Result<()> {
        let request = Nat44AddDelAddressRange {
            first_ip_address: address.octets(),
            last_ip_address: address.octets(),
            vrf_id: 0,
            is_add,
            flags: NatFlags::NONE,
        };
        self.call(operation, &request, || address.to_string())?;
        Ok(())
    }

    /// Take pool addresses from whatever `sw_if_index` is assigned.
    pub fn add_nat44_interface_address(&self, sw_if_index: u32, flags: NatFlags) -> Result<()> {
        self.add_del_nat44_interface_address("add_nat44_interface_address", sw_if_index, flags, true)
    }

    pub fn del_nat44_interface_address(&self, sw_if_index: u32, flags: NatFlags) -> Result<()> {
        self.add_del_nat44_interface_address("del_nat44_interface_address", sw_if_index, flags, false)
    }

    fn add_del_nat44_interface_address(
        &self,
        operation: &'static str,
        sw_if_index: u32,
        flags: NatFlags,
        is_add: bool,
    ) -> Result<()> {
        let request = Nat44AddDelInterfaceAddr {
            is_add,
            sw_if_index,
            flags,
        };
        self.call(operation, &request, || format!("{flags:?} on {sw_if_index}"))?;
        Ok(())
    }

    pub fn add_nat44_inside_interface(&self, sw_if_index: u32) -> Result<()> {
        self.nat44_feature("add_nat44_inside_interface", sw_if_index, NatFlags::INSIDE, true)
    }

    pub fn add_nat44_outside_interface(&self, sw_if_index: u32) -> Result<()> {
        self.nat44_feature("add_nat44_outside_interface", sw_if_index, NatFlags::OUTSIDE, true)
    }

    pub fn del_nat44_inside_interface(&self, sw_if_index: u32) -> Result<()> {
        self.nat44_feature("del_nat44_inside_interface", sw_if_index, NatFlags::INSIDE, false)
    }

    pub fn del_nat44_outside_interface(&self, sw_if_index: u32) -> Result<()> {
        self.nat44_feature("del_nat44_outside_interface", sw_if_index, NatFlags::OUTSIDE, false)
    }

    fn nat44_feature(
        &self,
        operation: &'static str,
        sw_if_index: u32,
        flags: NatFlags,
        is_add: bool,
    ) -> Result<()> {
        let request = Nat44InterfaceAddDelFeature {
            is_add,
            flags,
            sw_if_index,
        };
        self.call(operation, &request, || format!("{flags:?} on {sw_if_index}"))?;
        Ok(())
    }

    /// Map the service endpoint onto its single backend.
    pub fn add_nat44_static_mapping(&self, entry: &Nat44Entry) -> Result<()> {
        const OPERATION: &str = "add_nat44_static_mapping";
        let [backend] = entry.backend_ips.as_slice() else {
            return Err(VppError::invalid(
                OPERATION,
                format!("expected one backend, got {}", entry.backend_ips.len()),
            ));
        };
        self.static_mapping(OPERATION, entry, *backend, entry.backend_port, true)
    }

    pub fn del_nat44_static_mapping(&self, entry: &Nat44Entry) -> Result<()> {
        self.static_mapping("del_nat44_static_mapping", entry, Ipv4Addr::UNSPECIFIED, 0, false)
    }

    fn static_mapping(
        &self,
        operation: &'static str,
        entry: &Nat44Entry,
        local: Ipv4Addr,
        local_port: u16,
        is_add: bool,
    ) -> Result<()> {
        let request = Nat44AddDelStaticMapping {
            is_add,
            flags: SERVICE_FLAGS,
            local_ip_address: local.octets(),
            external_ip_address: entry.service_ip.octets(),
            protocol: entry.protocol.number(),
            local_port,
            external_port: entry.service_port,
            external_sw_if_index: INVALID_SW_IF_INDEX,
            ..Nat44AddDelStaticMapping::default()
        };
        self.call(operation, &request, || entry.to_string())?;
        Ok(())
    }

    /// Balance the service endpoint over every backend.
    pub fn add_nat44_lb_static_mapping(&self, entry: &Nat44Entry) -> Result<()> {
        let locals = entry
            .backend_ips
            .iter()
            .map(|addr| {
                debug!(backend = %addr, port = entry.backend_port, "adding local");
                Nat44LbAddrPort {
                    addr: addr.octets(),
                    port: entry.backend_port,
                    probability: LB_BACKEND_PROBABILITY,
                    vrf_id: 0,
                }
            })
            .collect();
        self.lb_static_mapping("add_nat44_lb_static_mapping", entry, locals, true)
    }

    pub fn del_nat44_lb_static_mapping(&self, entry: &Nat44Entry) -> Result<()> {
        self.lb_static_mapping("del_nat44_lb_static_mapping", entry, Vec::new(), false)
    }

    fn lb_static_mapping(
        &self,
        operation: &'static str,
        entry: &Nat44Entry,
        locals: Vec<Nat44LbAddrPort>,
        is_add: bool,
    ) -> Result<()> {
        let request = Nat44AddDelLbStaticMapping {
            is_add,
            flags: SERVICE_FLAGS,
            external_addr: entry.service_ip.octets(),
            external_port: entry.service_port,
            protocol: entry.protocol.number(),
            locals,
            ..Nat44AddDelLbStaticMapping::default()
        };
        self.call(operation, &request, || entry.to_string())?;
        Ok(())
    }

    /// Program a service: a plain static mapping for one backend, a
    /// load-balanced one for several.
    pub fn add_nat44_lb(&self, entry: &Nat44Entry) -> Result<()> {
        match entry.backend_ips.len() {
            0 => Err(VppError::invalid("add_nat44_lb", "no backends provided")),
            1 => self.add_nat44_static_mapping(entry),
            _ => self.add_nat44_lb_static_mapping(entry),
        }
    }

    /// Remove a service programmed by [`add_nat44_lb`](Self::add_nat44_lb)
    /// with the same backend count.
    pub fn del_nat44_lb(&self, entry: &Nat44Entry) -> Result<()> {
        match entry.backend_ips.len() {
            0 => Err(VppError::invalid("del_nat44_lb", "no backends provided")),
            1 => self.del_nat44_static_mapping(entry),
            _ => self.del_nat44_lb_static_mapping(entry),
        }
    }
}
