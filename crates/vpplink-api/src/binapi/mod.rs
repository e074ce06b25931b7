//! Message bindings for the engine modules this client drives.
//!
//! Field layouts follow the engine's `*.api.json` definitions for the
//! release named by [`BINAPI_VERSION`]. Variable-length arrays and strings
//! carry a `u32` length prefix.

use std::collections::HashSet;

use crate::error::{ApiError, Result};
use crate::message::{is_crc, Message, MessageIdentity, MessageKind};

pub mod calico;
pub mod interfaces;
pub mod ip;
pub mod ip_neighbor;
pub mod ip_types;
pub mod memclnt;
pub mod nat;
pub mod tapv2;
pub mod vpe;

/// Engine release the bindings were taken from.
pub const BINAPI_VERSION: &str = "20.05-rc0~540-gad1cca49e";

/// Interface index meaning "none" or "all", depending on the message.
pub const INVALID_SW_IF_INDEX: u32 = u32::MAX;

macro_rules! bindings {
    ($($ty:path),* $(,)?) => {
        vec![$( (<$ty as Message>::identity(), <$ty as Message>::KIND) ),*]
    };
}

/// Identity and kind of every compiled-in binding.
pub fn all_bindings() -> Vec<(MessageIdentity, MessageKind)> {
    bindings![
        memclnt::SockclntCreate,
        memclnt::SockclntCreateReply,
        memclnt::SockclntDelete,
        memclnt::SockclntDeleteReply,
        memclnt::ControlPing,
        memclnt::ControlPingReply,
        memclnt::ApiVersions,
        memclnt::ApiVersionsReply,
        vpe::ShowVersion,
        vpe::ShowVersionReply,
        interfaces::SwInterfaceSetFlags,
        interfaces::SwInterfaceSetFlagsReply,
        interfaces::SwInterfaceAddDelAddress,
        interfaces::SwInterfaceAddDelAddressReply,
        interfaces::SwInterfaceSetRxMode,
        interfaces::SwInterfaceSetRxModeReply,
        interfaces::SwInterfaceSetRxPlacement,
        interfaces::SwInterfaceSetRxPlacementReply,
        interfaces::SwInterfaceSetUnnumbered,
        interfaces::SwInterfaceSetUnnumberedReply,
        interfaces::SwInterfaceDump,
        interfaces::SwInterfaceDetails,
        ip::IpRouteAddDel,
        ip::IpRouteAddDelReply,
        ip::IpRouteDump,
        ip::IpRouteDetails,
        ip::SwInterfaceIp6EnableDisable,
        ip::SwInterfaceIp6EnableDisableReply,
        ip::IpAddressDump,
        ip::IpAddressDetails,
        ip::IpPuntRedirect,
        ip::IpPuntRedirectReply,
        ip_neighbor::IpNeighborAddDel,
        ip_neighbor::IpNeighborAddDelReply,
        ip_neighbor::IpNeighborDump,
        ip_neighbor::IpNeighborDetails,
        tapv2::TapCreateV2,
        tapv2::TapCreateV2Reply,
        tapv2::TapDeleteV2,
        tapv2::TapDeleteV2Reply,
        nat::Nat44ForwardingEnableDisable,
        nat::Nat44ForwardingEnableDisableReply,
        nat::Nat44AddDelAddressRange,
        nat::Nat44AddDelAddressRangeReply,
        nat::Nat44AddDelInterfaceAddr,
        nat::Nat44AddDelInterfaceAddrReply,
        nat::Nat44InterfaceAddDelFeature,
        nat::Nat44InterfaceAddDelFeatureReply,
        nat::Nat44AddDelStaticMapping,
        nat::Nat44AddDelStaticMappingReply,
        nat::Nat44AddDelLbStaticMapping,
        nat::Nat44AddDelLbStaticMappingReply,
        calico::CalicoAddDelIntfNat4,
        calico::CalicoAddDelIntfNat4Reply,
        calico::CalicoAddDelIntfNat6,
        calico::CalicoAddDelIntfNat6Reply,
        calico::CalicoAddDelAs,
        calico::CalicoAddDelAsReply,
        calico::CalicoAddDelVip,
        calico::CalicoAddDelVipReply,
        calico::CalicoAddDelSnatEntry,
        calico::CalicoAddDelSnatEntryReply,
    ]
}

/// Verify the compiled-in bindings and return the release they belong to.
///
/// Every binding needs a non-empty name and an eight-digit lowercase hex
/// CRC, and no name may be bound twice.
pub fn check_bindings() -> Result<&'static str> {
    let mut seen = HashSet::new();
    for (identity, _) in all_bindings() {
        if identity.name().is_empty() {
            return Err(ApiError::InvalidBinding("empty message name".to_string()));
        }
        let crc = identity.crc();
        if !is_crc(crc) || crc.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(ApiError::InvalidBinding(format!(
                "bad CRC for {}: {crc:?}",
                identity.name()
            )));
        }
        if !seen.insert(identity.name().to_string()) {
            return Err(ApiError::InvalidBinding(format!(
                "duplicate binding {}",
                identity.name()
            )));
        }
    }
    Ok(BINAPI_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_are_consistent() {
        assert_eq!(check_bindings().unwrap(), BINAPI_VERSION);
    }

    #[test]
    fn reply_names_follow_request_names() {
        let bindings = all_bindings();
        let names: HashSet<&str> = bindings.iter().map(|(id, _)| id.name()).collect();
        for (identity, kind) in &bindings {
            if *kind == MessageKind::Reply {
                let request = identity.name().trim_end_matches("_reply");
                assert!(names.contains(request), "{} has no request", identity.name());
            }
        }
    }

    #[test]
    fn exactly_one_terminator() {
        let terminators: Vec<_> = all_bindings()
            .into_iter()
            .filter(|(_, kind)| *kind == MessageKind::Terminator)
            .collect();
        assert_eq!(terminators.len(), 1);
        assert_eq!(terminators[0].0.name(), "control_ping_reply");
    }
}
