use std::collections::BTreeSet;
use std::thread;

use vpplink::api::binapi::interfaces::{SwInterfaceDetails, SwInterfaceDump};
use vpplink::api::binapi::tapv2::{TapCreateV2, TapCreateV2Reply};
use vpplink::api::MockChannel;
use vpplink::types::TapV2;
use vpplink::VppLink;

const CALLERS: u32 = 16;
const CALLS_PER_CALLER: u32 = 25;

/// The engine answers each create with the instance id it was asked for, so
/// a caller that sees someone else's reply would get the wrong index back.
fn echo_engine() -> MockChannel {
    MockChannel::new()
        .on::<TapCreateV2, _>(|request| TapCreateV2Reply {
            retval: 0,
            sw_if_index: request.id,
        })
        .on_dump::<SwInterfaceDump, _>(|_| {
            (0..8)
                .map(|sw_if_index| SwInterfaceDetails {
                    sw_if_index,
                    ..SwInterfaceDetails::default()
                })
                .collect()
        })
}

#[test]
fn concurrent_callers_only_see_their_own_replies() {
    let channel = echo_engine();
    let log = channel.log();
    let link = VppLink::new(channel);

    let returned: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|caller| {
                let link = &link;
                scope.spawn(move || {
                    let mut seen = Vec::new();
                    for call in 0..CALLS_PER_CALLER {
                        let id = caller * 1000 + call;
                        let tap = TapV2 {
                            id,
                            ..TapV2::default()
                        };
                        let index = link.create_tap_v2(&tap).unwrap();
                        assert_eq!(index, id);
                        seen.push(index);
                        if call % 5 == 0 {
                            assert_eq!(link.dump_interfaces().unwrap().len(), 8);
                        }
                    }
                    seen
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    let unique: BTreeSet<u32> = returned.iter().copied().collect();
    assert_eq!(unique.len(), (CALLERS * CALLS_PER_CALLER) as usize);
    assert_eq!(log.overlaps(), 0);
    assert_eq!(log.count("tap_create_v2"), (CALLERS * CALLS_PER_CALLER) as usize);
}

#[test]
fn panicking_holder_does_not_wedge_the_link() {
    let link = VppLink::new(echo_engine());

    let result = thread::scope(|scope| {
        scope
            .spawn(|| {
                link.with_channel(|_| panic!("caller bug while holding the channel"));
            })
            .join()
    });
    assert!(result.is_err());

    let tap = TapV2 {
        id: 42,
        ..TapV2::default()
    };
    assert_eq!(link.create_tap_v2(&tap).unwrap(), 42);
}
