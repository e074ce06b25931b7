use std::net::IpAddr;

use vpplink_api::binapi::ip::{
    FibPath, FibPathFlags, FibPathNh, FibPathNhProto, FibPathType, IpRoute,
};

use super::addr::{ip_from_union, ip_to_union, IpPrefix};

/// A single-path route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub dst: IpPrefix,
    /// Next hop; `None` for attached routes.
    pub gw: Option<IpAddr>,
    /// FIB table the route lives in.
    pub table: u32,
    /// FIB table the path resolves in.
    pub dst_table: u32,
    pub sw_if_index: u32,
}

impl Route {
    pub fn to_wire(&self) -> IpRoute {
        let proto = if self.dst.is_ipv6() {
            FibPathNhProto::Ip6
        } else {
            FibPathNhProto::Ip4
        };
        let path = FibPath {
            sw_if_index: self.sw_if_index,
            table_id: self.dst_table,
            rpf_id: 0,
            weight: 1,
            preference: 0,
            path_type: FibPathType::Normal,
            flags: FibPathFlags::NONE,
            proto,
            nh: FibPathNh {
                address: self.gw.map(ip_to_union).unwrap_or_default(),
                ..FibPathNh::default()
            },
        };
        IpRoute {
            table_id: self.table,
            stats_index: 0,
            prefix: self.dst.to_wire(),
            paths: vec![path],
        }
    }

    /// `None` unless the route has exactly one path.
    ///
    /// An all-zero next hop reads back as an attached route.
    pub fn from_wire(route: &IpRoute) -> Option<Self> {
        let [path] = route.paths.as_slice() else {
            return None;
        };
        let dst = IpPrefix::from_wire(&route.prefix);
        let gw = ip_from_union(&path.nh.address, dst.is_ipv6());
        Some(Self {
            dst,
            gw: (!gw.is_unspecified()).then_some(gw),
            table: route.table_id,
            dst_table: path.table_id,
            sw_if_index: path.sw_if_index,
        })
    }
}
