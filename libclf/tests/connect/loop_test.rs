#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use common::fixtures;
use common::helpers::{init_logger, recorder, scripted_terminate};
use libclf::test_support::mock_frontend;
use libclf::driver::MockReply;
use libclf::{
    CardOptions, CommunicationError, ConnectOptions, ConnectOutcome, Error, ModeOptions,
    PeerOptions, Protocol, ReaderOptions, RemoteTarget, Role, Target,
};

fn quick<T>(options: ModeOptions<T>) -> ModeOptions<T> {
    options.interval(Duration::ZERO)
}

#[test]
fn connect_with_terminate_true() {
    init_logger();
    let modes: [fn() -> ConnectOptions; 3] = [
        || ConnectOptions::new().llcp(PeerOptions::new()),
        || ConnectOptions::new().rdwr(ReaderOptions::new()),
        || ConnectOptions::new().card(CardOptions::new()),
    ];
    for mode in modes {
        let (mut clf, mock) = mock_frontend();
        let (terminate, asked) = scripted_terminate(&[true]);
        let outcome = clf.connect(mode().terminate(terminate)).unwrap();
        assert!(matches!(outcome, ConnectOutcome::Absent));
        assert_eq!(asked.get(), 1);
        assert_eq!(mock.mute_count(), 1);
    }
}

#[test]
fn terminate_false_then_true_runs_two_rounds() {
    let (mut clf, mock) = mock_frontend();
    let (terminate, asked) = scripted_terminate(&[false, true]);
    let options = ConnectOptions::new()
        .rdwr(quick(ReaderOptions::new()).target(RemoteTarget::new("106A").unwrap()))
        .terminate(terminate);
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert_eq!(asked.get(), 2);
    assert_eq!(mock.mute_count(), 2);
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 2);
}

#[test]
fn connect_llcp_initiator() {
    let (mut clf, mock) = mock_frontend();
    let (terminate, _) = scripted_terminate(&[false, true]);
    let options = ConnectOptions::new()
        .llcp(PeerOptions::from(quick(ModeOptions::new())).role(Role::Initiator))
        .terminate(terminate);
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    let brtys: Vec<String> = mock
        .sense_calls(Protocol::Dep)
        .iter()
        .map(|t| t.brty().to_string())
        .collect();
    assert_eq!(brtys, ["106A", "212F", "424F", "106A", "212F", "424F"]);
}

#[test]
fn connect_rdwr_defaults() {
    let (mut clf, mock) = mock_frontend();
    let (terminate, asked) = scripted_terminate(&[false, true]);
    let options = ConnectOptions::new()
        .rdwr(ReaderOptions::new().iterations(1))
        .terminate(terminate);
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert_eq!(asked.get(), 1);
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 1);
    assert_eq!(mock.sense_calls(Protocol::Ttb).len(), 1);
    assert_eq!(mock.sense_calls(Protocol::Ttf).len(), 1);
}

#[test]
fn connect_false_on_error() {
    let faults: [fn() -> MockReply<()>; 3] = [
        || MockReply::Io,
        || MockReply::Unsupported,
        || MockReply::Interrupted,
    ];
    for fault in faults {
        let (mut clf, mock) = mock_frontend();
        mock.fail_all(fault);
        let options = ConnectOptions::new().llcp(PeerOptions::new().role(Role::Initiator));
        let outcome = clf.connect(options).unwrap();
        assert!(outcome.is_aborted(), "{:?}", outcome);
    }
}

#[test]
fn connect_fails_when_every_call_fails() {
    let (mut clf, mock) = mock_frontend();
    mock.fail_all(|| MockReply::Communication(CommunicationError::Transmission("crc".into())));
    let options = ConnectOptions::new().rdwr(ReaderOptions::new());
    match clf.connect(options).unwrap() {
        ConnectOutcome::Aborted(Error::Communication(CommunicationError::Transmission(_))) => {}
        other => panic!("expected aborted connect, got {:?}", other),
    }
    assert_eq!(mock.mute_count(), 1);
}

#[test]
fn connect_rdwr_found_tta_target() {
    let (mut clf, mock) = mock_frontend();
    mock.set_sense(Protocol::Tta, MockReply::Found(fixtures::type1_tag()));
    let (terminate, _) = scripted_terminate(&[false, true]);
    let (on_connect, seen) = recorder::<Target>();
    let options = ConnectOptions::new()
        .rdwr(
            ReaderOptions::new()
                .iterations(1)
                .target(RemoteTarget::new("106A").unwrap())
                .on_connect(on_connect),
        )
        .terminate(terminate);
    let outcome = clf.connect(options).unwrap();
    assert!(outcome.is_connected());
    assert_eq!(outcome.target(), Some(&Target::Remote(fixtures::type1_tag())));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn on_discover_false_keeps_looping() {
    let (mut clf, mock) = mock_frontend();
    mock.set_sense(Protocol::Tta, MockReply::Found(fixtures::type2_tag()));
    let (on_connect, connected) = recorder::<Target>();
    let options = ConnectOptions::new().rdwr(
        quick(ReaderOptions::new())
            .iterations(3)
            .target(RemoteTarget::new("106A").unwrap())
            .on_discover(|_| false)
            .on_connect(on_connect),
    );
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert!(connected.borrow().is_empty());
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 3);
}

#[test]
fn on_connect_false_keeps_looping() {
    let (mut clf, mock) = mock_frontend();
    mock.set_sense(Protocol::Tta, MockReply::Found(fixtures::type2_tag()));
    let mut answers = vec![false, true].into_iter();
    let options = ConnectOptions::new().rdwr(
        quick(ReaderOptions::new())
            .target(RemoteTarget::new("106A").unwrap())
            .on_connect(move |_| answers.next().unwrap_or(true)),
    );
    assert!(clf.connect(options).unwrap().is_connected());
    assert_eq!(mock.sense_calls(Protocol::Tta).len(), 2);
}

#[test]
fn interval_paces_attempts() {
    let (mut clf, _mock) = mock_frontend();
    let options = ConnectOptions::new().rdwr(
        ReaderOptions::new()
            .iterations(3)
            .interval(Duration::from_millis(30))
            .target(RemoteTarget::new("106A").unwrap()),
    );
    let started = Instant::now();
    assert!(matches!(clf.connect(options).unwrap(), ConnectOutcome::Absent));
    assert!(started.elapsed() >= Duration::from_millis(60));
}
