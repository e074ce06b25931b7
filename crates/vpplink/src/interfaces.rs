//! Interface, address and TAP device verbs.

use std::net::IpAddr;

use tracing::{debug, info};
use vpplink_api::binapi::interfaces::{
    IfStatusFlags, SwInterfaceAddDelAddress, SwInterfaceDump, SwInterfaceSetFlags,
    SwInterfaceSetRxMode, SwInterfaceSetRxPlacement, SwInterfaceSetUnnumbered,
};
use vpplink_api::binapi::ip::{
    IpAddressDump, IpPuntRedirect, PuntRedirect, SwInterfaceIp6EnableDisable,
};
use vpplink_api::binapi::ip_neighbor::IpNeighborDump;
use vpplink_api::binapi::ip_types::AddressFamily;
use vpplink_api::binapi::tapv2::{TapCreateV2, TapDeleteV2, TapFlags};
use vpplink_api::{Channel, INVALID_SW_IF_INDEX};

use crate::error::{Result, VppError};
use crate::link::{exchange, VppLink};
use crate::types::{ip_to_wire, IfAddress, InterfaceDetails, IpPrefix, Neighbor, RxMode, TapV2};

/// Engine result code for a TAP instance that already exists.
pub const RETVAL_DEVICE_BUSY: i32 = -16;

impl<C: Channel> VppLink<C> {
    /// Create a TAP device and return its interface index.
    pub fn create_tap_v2(&self, tap: &TapV2) -> Result<u32> {
        let request = tap_request("create_tap_v2", tap, TapFlags::empty())?;
        let reply = self.call("create_tap_v2", &request, || format!("{tap:?}"))?;
        info!(sw_if_index = reply.sw_if_index, tag = %tap.tag, "tap created");
        Ok(reply.sw_if_index)
    }

    /// Create a persistent TAP, attaching to an existing host device if one
    /// is present.
    ///
    /// When the engine reports the device busy the create is retried once
    /// without the attach flag, and that second reply decides the outcome.
    pub fn create_or_attach_tap_v2(&self, tap: &TapV2) -> Result<u32> {
        const OPERATION: &str = "create_or_attach_tap_v2";
        let attach = tap_request(OPERATION, tap, TapFlags::ATTACH | TapFlags::PERSIST)?;
        let create = tap_request(OPERATION, tap, TapFlags::PERSIST)?;
        let attempted = || format!("{tap:?}");

        let mut channel = self.lock();
        let reply = match exchange(&mut *channel, OPERATION, &attach, attempted) {
            Err(err) if err.retval() == Some(RETVAL_DEVICE_BUSY) => {
                debug!(tag = %tap.tag, "tap busy, retrying without attach");
                exchange(&mut *channel, OPERATION, &create, attempted)?
            }
            other => other?,
        };
        info!(sw_if_index = reply.sw_if_index, tag = %tap.tag, "tap ready");
        Ok(reply.sw_if_index)
    }

    pub fn del_tap(&self, sw_if_index: u32) -> Result<()> {
        self.call("del_tap", &TapDeleteV2 { sw_if_index }, || {
            format!("sw_if_index {sw_if_index}")
        })?;
        Ok(())
    }

    pub fn add_interface_address(&self, sw_if_index: u32, prefix: &IpPrefix) -> Result<()> {
        self.add_del_interface_address("add_interface_address", sw_if_index, prefix, true)
    }

    pub fn del_interface_address(&self, sw_if_index: u32, prefix: &IpPrefix) -> Result<()> {
        self.add_del_interface_address("del_interface_address", sw_if_index, prefix, false)
    }

    fn add_del_interface_address(
        &self,
        operation: &'static str,
        sw_if_index: u32,
        prefix: &IpPrefix,
        is_add: bool,
    ) -> Result<()> {
        let request = SwInterfaceAddDelAddress {
            sw_if_index,
            is_add,
            del_all: false,
            prefix: prefix.to_wire(),
        };
        self.call(operation, &request, || format!("{prefix} on {sw_if_index}"))?;
        Ok(())
    }

    /// Addresses configured on one interface, for one family.
    pub fn interface_addresses(&self, sw_if_index: u32, ipv6: bool) -> Result<Vec<IfAddress>> {
        let request = IpAddressDump {
            sw_if_index,
            is_ipv6: ipv6,
        };
        self.collect("interface_addresses", &request, |details| {
            Some(IfAddress {
                sw_if_index: details.sw_if_index,
                prefix: IpPrefix::from_wire(&details.prefix),
            })
        })
    }

    pub fn enable_interface_ip6(&self, sw_if_index: u32) -> Result<()> {
        self.enable_disable_ip6("enable_interface_ip6", sw_if_index, true)
    }

    pub fn disable_interface_ip6(&self, sw_if_index: u32) -> Result<()> {
        self.enable_disable_ip6("disable_interface_ip6", sw_if_index, false)
    }

    fn enable_disable_ip6(
        &self,
        operation: &'static str,
        sw_if_index: u32,
        enable: bool,
    ) -> Result<()> {
        let request = SwInterfaceIp6EnableDisable {
            sw_if_index,
            enable,
        };
        self.call(operation, &request, || format!("sw_if_index {sw_if_index}"))?;
        Ok(())
    }

    pub fn interface_admin_up(&self, sw_if_index: u32) -> Result<()> {
        self.set_flags("interface_admin_up", sw_if_index, IfStatusFlags::ADMIN_UP)
    }

    pub fn interface_admin_down(&self, sw_if_index: u32) -> Result<()> {
        self.set_flags("interface_admin_down", sw_if_index, IfStatusFlags::empty())
    }

    fn set_flags(
        &self,
        operation: &'static str,
        sw_if_index: u32,
        flags: IfStatusFlags,
    ) -> Result<()> {
        let request = SwInterfaceSetFlags { sw_if_index, flags };
        self.call(operation, &request, || format!("{flags:?} on {sw_if_index}"))?;
        Ok(())
    }

    /// Set the receive mode of one queue, or of every queue when `queue_id`
    /// is `None`.
    pub fn set_interface_rx_mode(
        &self,
        sw_if_index: u32,
        queue_id: Option<u32>,
        mode: RxMode,
    ) -> Result<()> {
        let request = SwInterfaceSetRxMode {
            sw_if_index,
            queue_id_valid: queue_id.is_some(),
            queue_id: queue_id.unwrap_or_default(),
            mode,
        };
        self.call("set_interface_rx_mode", &request, || {
            format!("{mode:?} on {sw_if_index} queue {queue_id:?}")
        })?;
        Ok(())
    }

    /// Pin a receive queue to a worker thread, or to the main thread.
    pub fn set_interface_rx_placement(
        &self,
        sw_if_index: u32,
        queue_id: u32,
        worker_id: u32,
        is_main: bool,
    ) -> Result<()> {
        let request = SwInterfaceSetRxPlacement {
            sw_if_index,
            queue_id,
            worker_id,
            is_main,
        };
        self.call("set_interface_rx_placement", &request, || {
            format!("{sw_if_index} queue {queue_id} on worker {worker_id} (main {is_main})")
        })?;
        Ok(())
    }

    /// Let `unnumbered_sw_if_index` borrow the addresses of `sw_if_index`.
    pub fn interface_set_unnumbered(
        &self,
        unnumbered_sw_if_index: u32,
        sw_if_index: u32,
    ) -> Result<()> {
        self.set_unnumbered(
            "interface_set_unnumbered",
            unnumbered_sw_if_index,
            sw_if_index,
            true,
        )
    }

    pub fn interface_unset_unnumbered(
        &self,
        unnumbered_sw_if_index: u32,
        sw_if_index: u32,
    ) -> Result<()> {
        self.set_unnumbered(
            "interface_unset_unnumbered",
            unnumbered_sw_if_index,
            sw_if_index,
            false,
        )
    }

    fn set_unnumbered(
        &self,
        operation: &'static str,
        unnumbered_sw_if_index: u32,
        sw_if_index: u32,
        is_add: bool,
    ) -> Result<()> {
        let request = SwInterfaceSetUnnumbered {
            sw_if_index,
            unnumbered_sw_if_index,
            is_add,
        };
        self.call(operation, &request, || {
            format!("{unnumbered_sw_if_index} -> {sw_if_index}")
        })?;
        Ok(())
    }

    /// Every interface known to the engine.
    pub fn dump_interfaces(&self) -> Result<Vec<InterfaceDetails>> {
        self.collect("dump_interfaces", &all_interfaces(), |details| {
            Some(InterfaceDetails::from(&details))
        })
    }

    /// Index of the interface named `name`. When several match, the one the
    /// engine lists last wins.
    pub fn search_interface_with_name(&self, name: &str) -> Result<Option<u32>> {
        let found = self.collect("search_interface_with_name", &all_interfaces(), |details| {
            (details.interface_name.as_str() == name).then_some(details.sw_if_index)
        })?;
        let found = found.last().copied();
        log_search("name", name, found);
        Ok(found)
    }

    /// Index of the interface tagged `tag`. When several match, the one the
    /// engine lists last wins.
    pub fn search_interface_with_tag(&self, tag: &str) -> Result<Option<u32>> {
        let found = self.collect("search_interface_with_tag", &all_interfaces(), |details| {
            (details.tag.as_str() == tag).then_some(details.sw_if_index)
        })?;
        let found = found.last().copied();
        log_search("tag", tag, found);
        Ok(found)
    }

    /// Neighbor entries of one interface, for one family.
    pub fn interface_neighbors(&self, sw_if_index: u32, ipv6: bool) -> Result<Vec<Neighbor>> {
        let request = IpNeighborDump {
            sw_if_index,
            af: if ipv6 {
                AddressFamily::Ip6
            } else {
                AddressFamily::Ip4
            },
        };
        self.collect("interface_neighbors", &request, |details| {
            Some(Neighbor::from_wire(&details.neighbor))
        })
    }

    /// Redirect punted traffic received on `rx_sw_if_index` out of
    /// `tx_sw_if_index` towards `next_hop`.
    pub fn punt_redirect(
        &self,
        rx_sw_if_index: u32,
        tx_sw_if_index: u32,
        next_hop: IpAddr,
    ) -> Result<()> {
        let request = IpPuntRedirect {
            punt: PuntRedirect {
                rx_sw_if_index,
                tx_sw_if_index,
                nh: ip_to_wire(next_hop),
            },
            is_add: true,
        };
        self.call("punt_redirect", &request, || {
            format!("{rx_sw_if_index} -> {tx_sw_if_index} via {next_hop}")
        })?;
        Ok(())
    }
}

fn all_interfaces() -> SwInterfaceDump {
    SwInterfaceDump {
        sw_if_index: INVALID_SW_IF_INDEX,
        ..SwInterfaceDump::default()
    }
}

fn tap_request(operation: &'static str, tap: &TapV2, flags: TapFlags) -> Result<TapCreateV2> {
    tap.to_wire(flags)
        .map_err(|err| VppError::invalid(operation, err))
}

fn log_search(field: &str, value: &str, found: Option<u32>) {
    match found {
        Some(sw_if_index) => debug!(field, value, sw_if_index, "interface found"),
        None => debug!(field, value, "no matching interface"),
    }
}
