#[path = "../common/mod.rs"]
mod common;

use common::fixtures::hex;
use libclf::{Error, Field, RemoteTarget};

#[test]
fn init_sets_send_and_recv() {
    for (brty, send, recv) in [
        ("106A", "106A", "106A"),
        ("106A/212F", "106A", "212F"),
        ("424F/106B", "424F", "106B"),
    ] {
        let target = RemoteTarget::new(brty).unwrap();
        assert!(target.to_string().starts_with(send));
        assert_eq!(target.brty().to_string(), send);
        assert_eq!(target.brty_send().to_string(), send);
        assert_eq!(target.brty_recv().to_string(), recv);
        assert_eq!(target.get(&Field::from("some_attribute")), None);
    }
}

#[test]
fn init_with_fields() {
    let target = RemoteTarget::new("106A")
        .unwrap()
        .with("sens_req", hex("0102"))
        .with("integer", vec![5]);
    assert_eq!(target.get(&Field::SensReq), Some(&[0x01, 0x02][..]));
    assert_eq!(target.get(&Field::from("integer")), Some(&[5][..]));
    assert_eq!(target.fields().len(), 2);
}

#[test]
fn init_fail_names_input() {
    for brty in ["106", "A106", "106/106", "106A/", "212F/212F/212F"] {
        match RemoteTarget::new(brty) {
            Err(e @ Error::Pattern(_)) => {
                assert_eq!(e.to_string(), format!("brty pattern does not match for '{}'", brty))
            }
            other => panic!("expected pattern error for {}, got {:?}", brty, other),
        }
    }
}

#[test]
fn equal_targets() {
    let pairs = [
        (RemoteTarget::new("106A").unwrap(), RemoteTarget::new("106A").unwrap()),
        (RemoteTarget::new("106A/106A").unwrap(), RemoteTarget::new("106A").unwrap()),
        (
            RemoteTarget::new("106A").unwrap().with("a", vec![1]),
            RemoteTarget::new("106A").unwrap().with("a", vec![1]),
        ),
        (
            RemoteTarget::new("106A").unwrap().with("a", vec![1]).with("b", vec![2]),
            RemoteTarget::new("106A").unwrap().with("b", vec![2]).with("a", vec![1]),
        ),
    ];
    for (a, b) in pairs {
        assert_eq!(a, b);
    }
}

#[test]
fn unequal_targets() {
    let pairs = [
        (RemoteTarget::new("106A").unwrap(), RemoteTarget::new("212F").unwrap()),
        (RemoteTarget::new("106A/212F").unwrap(), RemoteTarget::new("106A").unwrap()),
        (
            RemoteTarget::new("106A").unwrap().with("a", vec![1]),
            RemoteTarget::new("106A").unwrap().with("b", vec![1]),
        ),
        (
            RemoteTarget::new("106A").unwrap().with("a", vec![1]),
            RemoteTarget::new("106A").unwrap(),
        ),
    ];
    for (a, b) in pairs {
        assert_ne!(a, b);
    }
}
