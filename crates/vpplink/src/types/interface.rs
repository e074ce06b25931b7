use vpplink_api::binapi::interfaces::{IfStatusFlags, SwInterfaceDetails};

pub use vpplink_api::binapi::interfaces::RxMode;

use super::addr::MacAddress;

/// One interface as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDetails {
    pub sw_if_index: u32,
    pub name: String,
    pub tag: String,
    pub mac: MacAddress,
    pub admin_up: bool,
    pub link_up: bool,
    pub mtu: u16,
}

impl From<&SwInterfaceDetails> for InterfaceDetails {
    fn from(details: &SwInterfaceDetails) -> Self {
        Self {
            sw_if_index: details.sw_if_index,
            name: details.interface_name.as_str().to_string(),
            tag: details.tag.as_str().to_string(),
            mac: MacAddress(details.l2_address),
            admin_up: details.flags.contains(IfStatusFlags::ADMIN_UP),
            link_up: details.flags.contains(IfStatusFlags::LINK_UP),
            mtu: details.link_mtu,
        }
    }
}

#[cfg(test)]
mod tests {
    use vpplink_api::FixedStr;

    use super::*;

    #[test]
    fn flags_split_into_admin_and_link() {
        let details = SwInterfaceDetails {
            sw_if_index: 2,
            interface_name: FixedStr::new("tap2").unwrap(),
            tag: FixedStr::new("cni").unwrap(),
            flags: IfStatusFlags::ADMIN_UP,
            link_mtu: 1500,
            ..SwInterfaceDetails::default()
        };
        let iface = InterfaceDetails::from(&details);
        assert_eq!(iface.name, "tap2");
        assert_eq!(iface.tag, "cni");
        assert!(iface.admin_up);
        assert!(!iface.link_up);
        assert_eq!(iface.mtu, 1500);
    }
}
