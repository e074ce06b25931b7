use vpplink_api::binapi::interfaces::{
    SwInterfaceDetails, SwInterfaceDump, SwInterfaceSetFlags, SwInterfaceSetFlagsReply,
};
use vpplink_api::binapi::memclnt::{ControlPing, ControlPingReply};
use vpplink_api::binapi::vpe::{ShowVersion, ShowVersionReply};
use vpplink_api::wire::Bytes;
use vpplink_api::{
    execute, execute_unchecked, stream, ApiError, FixedStr, Message, MockChannel, RawMessage,
};

fn interfaces(count: u32) -> Vec<SwInterfaceDetails> {
    (0..count)
        .map(|index| SwInterfaceDetails {
            sw_if_index: index,
            interface_name: FixedStr::new(format!("tap{index}")).unwrap(),
            ..SwInterfaceDetails::default()
        })
        .collect()
}

fn engine() -> MockChannel {
    MockChannel::new()
        .on::<ControlPing, _>(|_| ControlPingReply {
            retval: 0,
            client_index: 1,
            vpe_pid: 99,
        })
        .on::<SwInterfaceSetFlags, _>(|request| SwInterfaceSetFlagsReply {
            retval: if request.sw_if_index == 0 { 0 } else { -2 },
        })
        .on_dump::<SwInterfaceDump, _>(|_| interfaces(5))
}

#[test]
fn execute_returns_decoded_reply() {
    let mut channel = engine();
    let log = channel.log();

    let reply = execute(&mut channel, &ControlPing::default()).unwrap();
    assert_eq!(reply.vpe_pid, 99);
    assert_eq!(log.sent(), vec!["control_ping"]);
}

#[test]
fn nonzero_retval_names_the_reply() {
    let mut channel = engine();
    let request = SwInterfaceSetFlags {
        sw_if_index: 4,
        ..SwInterfaceSetFlags::default()
    };

    match execute(&mut channel, &request) {
        Err(err @ ApiError::Engine { message, retval, .. }) => {
            assert_eq!(message, SwInterfaceSetFlagsReply::NAME);
            assert_eq!(retval, -2);
            let reply: SwInterfaceSetFlagsReply = err.engine_reply().unwrap();
            assert_eq!(reply.retval, -2);
            assert!(err.engine_reply::<ControlPingReply>().is_none());
        }
        other => panic!("expected engine error, got {other:?}"),
    }

    let reply = execute_unchecked(&mut channel, &request).unwrap();
    assert_eq!(reply.retval, -2);
}

#[test]
fn wrong_reply_identity_is_rejected() {
    let mut channel = MockChannel::new().on_raw(ShowVersion::identity(), |_| {
        Ok(RawMessage::encode(&ControlPingReply::default()).unwrap())
    });

    let err = execute(&mut channel, &ShowVersion::default()).unwrap_err();
    match err {
        ApiError::UnexpectedReply { expected, received } => {
            assert!(expected.starts_with(ShowVersionReply::NAME));
            assert!(received.starts_with(ControlPingReply::NAME));
        }
        other => panic!("expected unexpected reply, got {other:?}"),
    }
}

#[test]
fn unregistered_message_never_leaves() {
    let mut channel = engine();
    let log = channel.log();

    let err = execute(&mut channel, &ShowVersion::default()).unwrap_err();
    assert!(matches!(err, ApiError::UnknownMessage(_)));
    assert!(!err.is_engine());
    assert!(log.sent().is_empty());
}

#[test]
fn stream_yields_in_order_then_ends() {
    let mut channel = engine();

    let mut details = stream(&mut channel, &SwInterfaceDump::default()).unwrap();
    let mut seen = Vec::new();
    for item in details.by_ref() {
        seen.push(item.unwrap().sw_if_index);
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    assert_eq!(details.yielded(), 5);
    assert!(details.is_finished());
    assert!(details.next().is_none());
}

#[test]
fn empty_dump_yields_nothing() {
    let mut channel = MockChannel::new().on_dump::<SwInterfaceDump, _>(|_| Vec::new());
    let count = stream(&mut channel, &SwInterfaceDump::default())
        .unwrap()
        .count();
    assert_eq!(count, 0);
}

#[test]
fn cancel_reports_discarded_details() {
    let mut channel = engine();
    let log = channel.log();

    let mut details = stream(&mut channel, &SwInterfaceDump::default()).unwrap();
    details.next().unwrap().unwrap();
    details.next().unwrap().unwrap();
    assert_eq!(details.cancel().unwrap(), 3);

    execute(&mut channel, &ControlPing::default()).unwrap();
    assert_eq!(log.overlaps(), 0);
}

#[test]
fn dropped_stream_is_drained() {
    let mut channel = engine();
    let log = channel.log();

    {
        let mut details = stream(&mut channel, &SwInterfaceDump::default()).unwrap();
        details.next().unwrap().unwrap();
    }

    execute(&mut channel, &ControlPing::default()).unwrap();
    assert_eq!(log.overlaps(), 0);
    assert_eq!(log.sent(), vec!["sw_interface_dump", "control_ping"]);
}

#[test]
fn undecodable_detail_is_reported_once_and_rest_drained() {
    let mut channel = MockChannel::new()
        .on::<ControlPing, _>(|_| ControlPingReply::default())
        .on_dump_raw(SwInterfaceDump::identity(), |_| {
            let good = RawMessage::encode(&interfaces(1)[0]).unwrap();
            let truncated = RawMessage {
                identity: SwInterfaceDetails::identity(),
                body: Bytes::from_static(&[0, 0]),
            };
            Ok(vec![good.clone(), truncated, good])
        });
    let log = channel.log();

    {
        let mut details = stream(&mut channel, &SwInterfaceDump::default()).unwrap();
        assert!(details.next().unwrap().is_ok());
        assert!(matches!(
            details.next(),
            Some(Err(ApiError::Decode { .. }))
        ));
        assert!(details.next().is_none());
    }

    execute(&mut channel, &ControlPing::default()).unwrap();
    assert_eq!(log.overlaps(), 0);
}

#[test]
fn disconnect_mid_dump_surfaces_once() {
    let mut channel = engine().disconnect_next_dump_after(2);

    let results: Vec<_> = stream(&mut channel, &SwInterfaceDump::default())
        .unwrap()
        .collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok() && results[1].is_ok());
    assert!(matches!(results[2], Err(ApiError::Disconnected(_))));

    let count = stream(&mut channel, &SwInterfaceDump::default())
        .unwrap()
        .count();
    assert_eq!(count, 5);
}
