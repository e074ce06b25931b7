use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use vpplink::api::binapi::calico::{
    CalicoAddDelVip, CalicoAddDelVipReply, CalicoEncapType,
};
use vpplink::api::binapi::interfaces::{
    IfStatusFlags, SwInterfaceDetails, SwInterfaceDump, SwInterfaceSetFlags,
    SwInterfaceSetFlagsReply,
};
use vpplink::api::binapi::ip::{
    FibPathNhProto, IpRoute, IpRouteAddDel, IpRouteAddDelReply, IpRouteDetails, IpRouteDump,
};
use vpplink::api::binapi::memclnt::{ApiVersions, ApiVersionsReply, ModuleVersion};
use vpplink::api::binapi::nat::{
    Nat44AddDelLbStaticMapping, Nat44AddDelLbStaticMappingReply, Nat44AddDelStaticMapping,
    Nat44AddDelStaticMappingReply,
};
use vpplink::api::binapi::tapv2::{TapCreateV2, TapCreateV2Reply, TapFlags};
use vpplink::api::{ApiError, FixedStr, MockChannel};
use vpplink::types::{CalicoVip, IpProto, Nat44Entry, NatFlags, Route, TapV2};
use vpplink::{VppError, VppLink, RETVAL_DEVICE_BUSY};

fn scenario_route() -> Route {
    Route {
        dst: "10.0.0.0/24".parse().unwrap(),
        gw: Some("192.0.2.1".parse().unwrap()),
        table: 0,
        dst_table: 0,
        sw_if_index: 5,
    }
}

fn interface(index: u32, name: &str, tag: &str) -> SwInterfaceDetails {
    SwInterfaceDetails {
        sw_if_index: index,
        interface_name: FixedStr::new(name).unwrap(),
        tag: FixedStr::new(tag).unwrap(),
        flags: IfStatusFlags::ADMIN_UP | IfStatusFlags::LINK_UP,
        link_mtu: 1500,
        ..SwInterfaceDetails::default()
    }
}

fn route_engine(retval: i32) -> (MockChannel, Arc<Mutex<Vec<IpRouteAddDel>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&seen);
    let channel = MockChannel::new().on::<IpRouteAddDel, _>(move |request| {
        captured.lock().unwrap().push(request);
        IpRouteAddDelReply {
            retval,
            stats_index: 0,
        }
    });
    (channel, seen)
}

#[test]
fn route_add_succeeds_on_zero_retval() {
    let (channel, seen) = route_engine(0);
    let link = VppLink::new(channel);

    link.route_add(&scenario_route()).unwrap();

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_add);
    let path = &requests[0].route.paths[0];
    assert_eq!(path.sw_if_index, 5);
    assert_eq!(path.proto, FibPathNhProto::Ip4);
    assert_eq!(path.nh.address[..4], [192, 0, 2, 1]);
    assert_eq!(requests[0].route.prefix.len, 24);
}

#[test]
fn route_add_engine_error_carries_code_and_route() {
    let (channel, _) = route_engine(-2);
    let link = VppLink::new(channel);

    match link.route_add(&scenario_route()) {
        Err(VppError::Engine {
            operation,
            retval,
            attempted,
        }) => {
            assert_eq!(operation, "route_add");
            assert_eq!(retval, -2);
            assert!(attempted.contains("10.0.0.0/24"), "{attempted}");
            assert!(attempted.contains("192.0.2.1"), "{attempted}");
        }
        other => panic!("expected engine error, got {other:?}"),
    }
}

#[test]
fn dump_interfaces_yields_every_detail() {
    let channel = MockChannel::new().on_dump::<SwInterfaceDump, _>(|request| {
        assert_eq!(request.sw_if_index, u32::MAX);
        vec![
            interface(0, "local0", ""),
            interface(1, "tap1", "ns/a"),
            interface(2, "tap2", "ns/b"),
        ]
    });
    let link = VppLink::new(channel);

    let interfaces = link.dump_interfaces().unwrap();
    assert_eq!(interfaces.len(), 3);
    assert_eq!(
        interfaces.iter().map(|i| i.sw_if_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(interfaces[1].name, "tap1");
    assert!(interfaces[2].admin_up && interfaces[2].link_up);
}

#[test]
fn create_or_attach_retries_without_attach_when_busy() {
    let flags_seen = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&flags_seen);
    let channel = MockChannel::new().on::<TapCreateV2, _>(move |request| {
        captured.lock().unwrap().push(request.tap_flags);
        if request.tap_flags.contains(TapFlags::ATTACH) {
            TapCreateV2Reply {
                retval: RETVAL_DEVICE_BUSY,
                sw_if_index: u32::MAX,
            }
        } else {
            TapCreateV2Reply {
                retval: 0,
                sw_if_index: 7,
            }
        }
    });
    let log = channel.log();
    let link = VppLink::new(channel);

    let tap = TapV2 {
        host_namespace: "pid:1234".into(),
        host_if_name: "eth0".into(),
        tag: "default/pod".into(),
        ..TapV2::default()
    };
    assert_eq!(link.create_or_attach_tap_v2(&tap).unwrap(), 7);

    assert_eq!(log.count("tap_create_v2"), 2);
    assert_eq!(
        *flags_seen.lock().unwrap(),
        vec![TapFlags::ATTACH | TapFlags::PERSIST, TapFlags::PERSIST]
    );
}

#[test]
fn create_or_attach_surfaces_other_errors_without_retry() {
    let channel = MockChannel::new().on::<TapCreateV2, _>(|_| TapCreateV2Reply {
        retval: -3,
        sw_if_index: u32::MAX,
    });
    let log = channel.log();
    let link = VppLink::new(channel);

    let err = link.create_or_attach_tap_v2(&TapV2::default()).unwrap_err();
    assert_eq!(err.retval(), Some(-3));
    assert_eq!(log.count("tap_create_v2"), 1);
}

#[test]
fn disconnect_mid_dump_is_an_error_and_releases_the_channel() {
    let channel = MockChannel::new()
        .on_dump::<SwInterfaceDump, _>(|_| (0..5).map(|i| interface(i, "tap", "")).collect())
        .on::<SwInterfaceSetFlags, _>(|_| SwInterfaceSetFlagsReply { retval: 0 })
        .disconnect_next_dump_after(2);
    let link = VppLink::new(channel);

    match link.dump_interfaces() {
        Err(VppError::Api {
            operation,
            source: ApiError::Disconnected(_),
        }) => assert_eq!(operation, "dump_interfaces"),
        other => panic!("expected disconnect, got {other:?}"),
    }

    link.interface_admin_up(1).unwrap();
    assert_eq!(link.dump_interfaces().unwrap().len(), 5);
}

#[test]
fn oversize_tap_name_is_rejected_before_sending() {
    let channel = MockChannel::new().on::<TapCreateV2, _>(|_| TapCreateV2Reply {
        retval: 0,
        sw_if_index: 1,
    });
    let log = channel.log();
    let link = VppLink::new(channel);

    let tap = TapV2 {
        host_if_name: "x".repeat(80),
        ..TapV2::default()
    };
    let err = link.create_tap_v2(&tap).unwrap_err();
    assert!(matches!(err, VppError::InvalidInput { operation: "create_tap_v2", .. }));
    assert!(log.sent().is_empty());
}

#[test]
fn search_keeps_last_match_and_drains_the_dump() {
    let channel = MockChannel::new().on_dump::<SwInterfaceDump, _>(|_| {
        vec![
            interface(1, "tap1", "cni"),
            interface(2, "tap2", "cni"),
            interface(3, "tap3", "other"),
            interface(4, "tap3", "other"),
        ]
    });
    let log = channel.log();
    let link = VppLink::new(channel);

    assert_eq!(link.search_interface_with_tag("cni").unwrap(), Some(2));
    assert_eq!(link.search_interface_with_name("tap3").unwrap(), Some(4));
    assert_eq!(link.search_interface_with_name("missing").unwrap(), None);
    assert_eq!(log.overlaps(), 0);
}

#[test]
fn get_routes_skips_multipath_entries() {
    let single = scenario_route().to_wire();
    let mut multi: IpRoute = single.clone();
    multi.paths.push(multi.paths[0].clone());

    let channel = MockChannel::new().on_dump::<IpRouteDump, _>(move |request| {
        assert_eq!(request.table.table_id, 0);
        assert!(!request.table.is_ip6);
        vec![
            IpRouteDetails {
                route: single.clone(),
            },
            IpRouteDetails {
                route: multi.clone(),
            },
        ]
    });
    let link = VppLink::new(channel);

    assert_eq!(link.get_routes(0, false).unwrap(), vec![scenario_route()]);
}

fn service(backends: &[[u8; 4]]) -> Nat44Entry {
    Nat44Entry {
        service_ip: Ipv4Addr::new(10, 96, 0, 10),
        service_port: 53,
        protocol: IpProto::Udp,
        backend_ips: backends.iter().map(|b| Ipv4Addr::from(*b)).collect(),
        backend_port: 5353,
    }
}

fn nat_engine() -> MockChannel {
    MockChannel::new()
        .on::<Nat44AddDelStaticMapping, _>(|request| {
            assert!(request.flags.contains(NatFlags::SELF_TWICE_NAT | NatFlags::OUT2IN_ONLY));
            assert_eq!(request.external_sw_if_index, u32::MAX);
            assert_eq!(request.protocol, 17);
            Nat44AddDelStaticMappingReply { retval: 0 }
        })
        .on::<Nat44AddDelLbStaticMapping, _>(|request| {
            assert_eq!(request.external_port, 53);
            if request.is_add {
                assert_eq!(request.locals.len(), 3);
                assert!(request.locals.iter().all(|l| l.probability == 10 && l.port == 5353));
            } else {
                assert!(request.locals.is_empty());
            }
            Nat44AddDelLbStaticMappingReply { retval: 0 }
        })
}

#[test]
fn nat44_lb_dispatches_on_backend_count() {
    let channel = nat_engine();
    let log = channel.log();
    let link = VppLink::new(channel);

    let err = link.add_nat44_lb(&service(&[])).unwrap_err();
    assert!(matches!(err, VppError::InvalidInput { .. }));
    assert!(log.sent().is_empty());

    link.add_nat44_lb(&service(&[[10, 0, 0, 5]])).unwrap();
    link.add_nat44_lb(&service(&[[10, 0, 0, 5], [10, 0, 0, 6], [10, 0, 0, 7]]))
        .unwrap();
    link.del_nat44_lb(&service(&[[10, 0, 0, 5], [10, 0, 0, 6], [10, 0, 0, 7]]))
        .unwrap();
    link.del_nat44_lb(&service(&[[10, 0, 0, 5]])).unwrap();

    assert_eq!(
        log.sent(),
        vec![
            "nat44_add_del_static_mapping",
            "nat44_add_del_lb_static_mapping",
            "nat44_add_del_lb_static_mapping",
            "nat44_add_del_static_mapping",
        ]
    );
}

#[test]
fn calico_vip_uses_tcp_and_fixed_flow_table() {
    let seen = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&seen);
    let channel = MockChannel::new().on::<CalicoAddDelVip, _>(move |request| {
        *captured.lock().unwrap() = Some(request);
        CalicoAddDelVipReply { retval: 0 }
    });
    let link = VppLink::new(channel);

    link.calico_add_vip(&CalicoVip {
        prefix: "fd10::1/128".parse().unwrap(),
        port: 443,
        target_port: 8443,
        encap_v6: true,
    })
    .unwrap();

    let request = seen.lock().unwrap().take().unwrap();
    assert_eq!(request.protocol, 6);
    assert_eq!(request.new_flows_table_length, 1024);
    assert_eq!(request.encap, CalicoEncapType::Nat6);
    assert!(!request.is_del);
}

#[test]
fn require_checks_engine_module_versions() {
    let channel = MockChannel::new().on::<ApiVersions, _>(|_| ApiVersionsReply {
        retval: 0,
        api_versions: vec![ModuleVersion {
            major: 3,
            minor: 2,
            patch: 2,
            name: FixedStr::new("interface").unwrap(),
        }],
    });
    let link = VppLink::new(channel);

    let found = link.require("interface", ">=3.1.0, <4.0.0").unwrap();
    assert_eq!(found.to_string(), "3.2.2");

    match link.require("interface", ">=4.0.0") {
        Err(VppError::Compat { operation, .. }) => assert_eq!(operation, "require"),
        other => panic!("expected compat error, got {other:?}"),
    }
}

#[test]
fn punt_redirect_unknown_to_engine_is_transport_class() {
    let link = VppLink::new(MockChannel::new());

    let err = link
        .punt_redirect(1, 2, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))
        .unwrap_err();
    assert!(!err.is_engine());
    assert!(matches!(
        err,
        VppError::Api {
            source: ApiError::UnknownMessage(_),
            ..
        }
    ));
}
