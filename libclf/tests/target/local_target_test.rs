#[path = "../common/mod.rs"]
mod common;

use common::fixtures::hex;
use libclf::{Error, Field, LocalTarget};

#[test]
fn init_keeps_brty() {
    for brty in ["106A", "212A", "424F"] {
        let target = LocalTarget::new(brty).unwrap();
        assert_eq!(target.brty().to_string(), brty);
        assert!(target.to_string().starts_with(brty));
        assert_eq!(target.get(&Field::from("some_attribute")), None);
    }
    let target = LocalTarget::new("212A")
        .unwrap()
        .with("sens_req", hex("0102"))
        .with("integer", vec![5]);
    assert_eq!(target.get(&Field::SensReq), Some(&[0x01, 0x02][..]));
    assert_eq!(target.get(&Field::from("integer")), Some(&[5][..]));
}

#[test]
fn init_rejects_bad_patterns() {
    for brty in ["106", "A106", "106A/212F"] {
        assert!(matches!(LocalTarget::new(brty), Err(Error::Pattern(_))));
    }
}

#[test]
fn equality() {
    assert_eq!(LocalTarget::default(), LocalTarget::new("106A").unwrap());
    assert_eq!(LocalTarget::new("212F").unwrap(), LocalTarget::new("212F").unwrap());
    assert_eq!(
        LocalTarget::new("106A").unwrap().with("a", vec![1]),
        LocalTarget::new("106A").unwrap().with("a", vec![1])
    );

    assert_ne!(LocalTarget::default(), LocalTarget::new("212F").unwrap());
    assert_ne!(LocalTarget::new("212F").unwrap(), LocalTarget::new("106A").unwrap());
    assert_ne!(
        LocalTarget::new("106A").unwrap().with("a", vec![1]),
        LocalTarget::new("106A").unwrap().with("b", vec![1])
    );
}
