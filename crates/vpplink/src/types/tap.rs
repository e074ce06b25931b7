use vpplink_api::binapi::tapv2::{TapCreateV2, TapFlags};
use vpplink_api::{FixedStr, WireError};

use super::addr::MacAddress;

/// Parameters of a TAP device whose host side lives in a network namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapV2 {
    pub host_namespace: String,
    pub host_if_name: String,
    pub tag: String,
    /// Engine-side MAC; random when unset.
    pub mac_address: Option<MacAddress>,
    pub host_mac_address: Option<MacAddress>,
    pub rx_queues: u8,
    /// Device instance; `u32::MAX` lets the engine pick one.
    pub id: u32,
}

impl Default for TapV2 {
    fn default() -> Self {
        Self {
            host_namespace: String::new(),
            host_if_name: String::new(),
            tag: String::new(),
            mac_address: None,
            host_mac_address: None,
            rx_queues: 0,
            id: u32::MAX,
        }
    }
}

impl TapV2 {
    /// Build the create request. Fails if a name does not fit its slot.
    pub fn to_wire(&self, flags: TapFlags) -> Result<TapCreateV2, WireError> {
        Ok(TapCreateV2 {
            id: self.id,
            use_random_mac: self.mac_address.is_none(),
            mac_address: self.mac_address.map(|m| m.octets()).unwrap_or_default(),
            num_rx_queues: self.rx_queues,
            host_mac_addr_set: self.host_mac_address.is_some(),
            host_mac_addr: self
                .host_mac_address
                .map(|m| m.octets())
                .unwrap_or_default(),
            host_namespace_set: true,
            host_namespace: FixedStr::new(&self.host_namespace)?,
            host_if_name_set: true,
            host_if_name: FixedStr::new(&self.host_if_name)?,
            tap_flags: flags,
            tag: FixedStr::new(&self.tag)?,
            ..TapCreateV2::default()
        })
    }
}
