#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::fixtures;
use common::helpers::scripted_terminate;
use libclf::test_support::mock_frontend;
use libclf::driver::{Call, MockReply};
use libclf::{
    CardOptions, ConnectOptions, ConnectOutcome, Field, ModeOptions, PeerOptions, Protocol,
    ReaderOptions, RemoteTarget, Role, Target,
};
use serde_json::json;

#[test]
fn connect_card_defaults() {
    let (mut clf, mock) = mock_frontend();
    let (terminate, _) = scripted_terminate(&[false, true]);
    let options = ConnectOptions::new()
        .card(
            CardOptions::new()
                .interval(Duration::ZERO)
                .timeout(Duration::from_millis(5))
                .on_startup(|targets| {
                    targets.clear();
                    targets.push(fixtures::type3_local());
                    true
                }),
        )
        .terminate(terminate);
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert_eq!(
        mock.listen_calls(Protocol::Ttf),
        vec![fixtures::type3_local(), fixtures::type3_local()]
    );
}

#[test]
fn default_card_target_advertises_ndef() {
    let (mut clf, mock) = mock_frontend();
    let options = ConnectOptions::new().card(CardOptions::new().iterations(1));
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    let listened = mock.listen_calls(Protocol::Ttf);
    assert_eq!(listened.len(), 1);
    assert_eq!(listened[0].brty().to_string(), "212F");
    let sensf_res = listened[0].get(&Field::SensfRes).unwrap();
    assert_eq!(sensf_res.len(), 19);
    assert_eq!(&sensf_res[..3], &[0x01, 0x02, 0xFE]);
    assert_eq!(&sensf_res[17..], &[0x12, 0xFC]);
}

#[test]
fn card_activation_connects_local_target() {
    let (mut clf, mock) = mock_frontend();
    mock.push_listen(Protocol::Ttf, MockReply::Found(fixtures::type3_activated()));
    let options = ConnectOptions::new().card(
        CardOptions::new()
            .target(fixtures::type3_local())
            .timeout(Duration::from_millis(20)),
    );
    let outcome = clf.connect(options).unwrap();
    assert_eq!(outcome.target(), Some(&Target::Local(fixtures::type3_activated())));
    match &mock.calls()[1] {
        Call::Listen(_, _, timeout) => assert_eq!(*timeout, Duration::from_millis(20)),
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn llcp_target_role_listens_for_dep() {
    let (mut clf, mock) = mock_frontend();
    let local = libclf::connect::defaults::peer_local_target();
    let activated = local
        .clone()
        .with(Field::AtrReq, fixtures::hex(fixtures::ATR_REQ));
    mock.push_listen(Protocol::Dep, MockReply::Found(activated.clone()));
    let options = ConnectOptions::new().llcp(PeerOptions::new().role(Role::Target).local(local));
    let outcome = clf.connect(options).unwrap();
    assert_eq!(outcome.into_target(), Some(Target::Local(activated)));
}

#[test]
fn llcp_initiator_connects_peer() {
    let (mut clf, mock) = mock_frontend();
    mock.push_sense(Protocol::Dep, MockReply::Found(fixtures::dep_response("106A")));
    let options = ConnectOptions::new().llcp(
        PeerOptions::from(ModeOptions::new().target(fixtures::dep_request("106A")))
            .role(Role::Initiator),
    );
    let outcome = clf.connect(options).unwrap();
    assert_eq!(outcome.into_target(), Some(Target::Remote(fixtures::dep_response("106A"))));
}

#[test]
fn modes_interleave_in_order() {
    let (mut clf, mock) = mock_frontend();
    let options = ConnectOptions::new()
        .card(
            CardOptions::new()
                .iterations(2)
                .interval(Duration::ZERO)
                .timeout(Duration::from_millis(1)),
        )
        .rdwr(
            ReaderOptions::new()
                .iterations(1)
                .interval(Duration::ZERO)
                .target(RemoteTarget::new("106B").unwrap()),
        )
        .llcp(
            PeerOptions::from(
                ModeOptions::new()
                    .iterations(2)
                    .interval(Duration::ZERO)
                    .target(fixtures::dep_request("212F")),
            )
            .role(Role::Initiator),
        );
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));

    let order: Vec<Protocol> = mock
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Sense(p, _) | Call::Listen(p, _, _) => Some(p),
            _ => None,
        })
        .collect();
    // rdwr is used up after the first round
    assert_eq!(
        order,
        [Protocol::Dep, Protocol::Ttb, Protocol::Ttf, Protocol::Dep, Protocol::Ttf]
    );
}

#[test]
fn unbounded_llcp_does_not_starve_reader() {
    let (mut clf, mock) = mock_frontend();
    mock.set_sense(Protocol::Tta, MockReply::Found(fixtures::type2_tag()));
    let mut script = vec![false; 9];
    script.push(true);
    let (terminate, asked) = scripted_terminate(&script);
    let options = ConnectOptions::new()
        .llcp(PeerOptions::from(ModeOptions::new().interval(Duration::ZERO)))
        .rdwr(
            ReaderOptions::new()
                .interval(Duration::ZERO)
                .target(RemoteTarget::new("106A").unwrap()),
        )
        .terminate(terminate);

    let outcome = clf.connect(options).unwrap();
    assert_eq!(outcome.into_target(), Some(Target::Remote(fixtures::type2_tag())));
    assert_eq!(asked.get(), 0);
    assert_eq!(mock.sense_calls(Protocol::Dep).len(), 3);
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 1);
}

#[test]
fn terminate_is_asked_once_per_round() {
    let (mut clf, mock) = mock_frontend();
    let (terminate, asked) = scripted_terminate(&[false, true]);
    let options = ConnectOptions::new()
        .rdwr(
            ReaderOptions::new()
                .interval(Duration::ZERO)
                .target(RemoteTarget::new("106A").unwrap()),
        )
        .card(
            CardOptions::new()
                .interval(Duration::ZERO)
                .timeout(Duration::from_millis(1)),
        )
        .terminate(terminate);
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert_eq!(asked.get(), 2);
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 2);
    assert_eq!(mock.listen_calls(Protocol::Ttf).len(), 2);
}

#[test]
fn connect_from_document() {
    let (mut clf, mock) = mock_frontend();
    mock.push_sense(Protocol::Ttf, MockReply::Found(fixtures::felica_card()));
    let outcome = clf
        .connect_json(&json!({
            "rdwr": { "targets": ["212F"], "iterations": 1, "interval": 0 }
        }))
        .unwrap();
    assert_eq!(outcome.into_target(), Some(Target::Remote(fixtures::felica_card())));
}
