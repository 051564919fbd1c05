#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::fixtures::{self, hex};
use libclf::test_support::mock_frontend;
use libclf::driver::{Call, MockReply};
use libclf::{Error, Field, LocalTarget, Protocol};

#[test]
fn listen_passes_timeout_and_returns_activation() {
    let (mut clf, mock) = mock_frontend();
    mock.push_listen(Protocol::Ttf, MockReply::Found(fixtures::type3_activated()));
    let timeout = Duration::from_millis(250);
    let found = clf.listen(&fixtures::type3_local(), timeout).unwrap();
    assert_eq!(found, Some(fixtures::type3_activated()));
    assert_eq!(
        mock.calls(),
        vec![
            Call::Mute,
            Call::Listen(Protocol::Ttf, fixtures::type3_local(), timeout),
        ]
    );
}

#[test]
fn listen_timeout_is_absence() {
    let (mut clf, _mock) = mock_frontend();
    assert_eq!(
        clf.listen(&fixtures::type3_local(), Duration::from_millis(1)).unwrap(),
        None
    );
}

#[test]
fn activation_without_command_is_discarded() {
    let (mut clf, mock) = mock_frontend();
    mock.push_listen(Protocol::Ttf, MockReply::Found(fixtures::type3_local()));
    assert_eq!(
        clf.listen(&fixtures::type3_local(), Duration::from_millis(1)).unwrap(),
        None
    );
}

#[test]
fn listen_requires_fields() {
    let (mut clf, mock) = mock_frontend();
    let err = clf
        .listen(&LocalTarget::new("212F").unwrap(), Duration::ZERO)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
    assert_eq!(err.to_string(), "sensf_res is required");

    let tta = LocalTarget::default()
        .with(Field::SensRes, hex("0101"))
        .with(Field::SddRes, hex("01020304"))
        .with(Field::SelRes, hex("40"));
    assert_eq!(
        clf.listen(&tta, Duration::ZERO).unwrap_err().to_string(),
        "sdd_res[0] must be 08h"
    );
    assert!(mock.calls().is_empty());
}

#[test]
fn listen_dep_checks_general_request() {
    let (mut clf, mock) = mock_frontend();
    let local = LocalTarget::default()
        .with(Field::SensRes, hex("0101"))
        .with(Field::SddRes, hex("08010203"))
        .with(Field::SelRes, hex("40"))
        .with(Field::AtrRes, hex(fixtures::ATR_RES));
    let activated = local.clone().with(Field::AtrReq, hex(fixtures::ATR_REQ));
    mock.push_listen(Protocol::Dep, MockReply::Found(activated.clone()));
    assert_eq!(clf.listen(&local, Duration::ZERO).unwrap(), Some(activated));
}

#[test]
fn listen_unsupported_rate() {
    let (mut clf, _mock) = mock_frontend();
    let local = LocalTarget::new("106B").unwrap();
    let local = local.with(Field::SensbRes, hex("50E8253EEC00000011008185"));
    assert!(clf.listen(&local, Duration::ZERO).unwrap().is_none());

    let local = LocalTarget::new("212B").unwrap();
    assert!(matches!(
        clf.listen(&local, Duration::ZERO),
        Err(Error::UnsupportedTarget(_))
    ));
}
