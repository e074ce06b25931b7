//! Route and neighbor verbs.

use tracing::{debug, info};
use vpplink_api::binapi::ip::{IpRouteAddDel, IpRouteDump, IpTable};
use vpplink_api::binapi::ip_neighbor::IpNeighborAddDel;
use vpplink_api::Channel;

use crate::error::Result;
use crate::link::VppLink;
use crate::types::{Neighbor, Route};

impl<C: Channel> VppLink<C> {
    /// Single-path routes of one FIB table. Multipath routes are skipped.
    pub fn get_routes(&self, table: u32, ipv6: bool) -> Result<Vec<Route>> {
        let request = IpRouteDump {
            table: IpTable {
                table_id: table,
                is_ip6: ipv6,
                ..IpTable::default()
            },
        };
        self.collect("get_routes", &request, |details| {
            let route = Route::from_wire(&details.route);
            if route.is_none() {
                info!(
                    table,
                    paths = details.route.paths.len(),
                    "skipping route without exactly one path"
                );
            }
            route
        })
    }

    pub fn route_add(&self, route: &Route) -> Result<()> {
        self.add_del_route("route_add", route, true)
    }

    pub fn route_del(&self, route: &Route) -> Result<()> {
        self.add_del_route("route_del", route, false)
    }

    fn add_del_route(&self, operation: &'static str, route: &Route, is_add: bool) -> Result<()> {
        let request = IpRouteAddDel {
            is_add,
            is_multipath: false,
            route: route.to_wire(),
        };
        self.call(operation, &request, || format!("{route:?}"))?;
        debug!(operation, dst = %route.dst, table = route.table, "route programmed");
        Ok(())
    }

    pub fn add_neighbor(&self, neighbor: &Neighbor) -> Result<()> {
        self.add_del_neighbor("add_neighbor", neighbor, true)
    }

    pub fn del_neighbor(&self, neighbor: &Neighbor) -> Result<()> {
        self.add_del_neighbor("del_neighbor", neighbor, false)
    }

    fn add_del_neighbor(
        &self,
        operation: &'static str,
        neighbor: &Neighbor,
        is_add: bool,
    ) -> Result<()> {
        let request = IpNeighborAddDel {
            is_add,
            neighbor: neighbor.to_wire(),
        };
        self.call(operation, &request, || format!("{neighbor:?}"))?;
        Ok(())
    }
}
