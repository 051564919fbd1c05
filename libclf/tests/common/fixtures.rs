// fixtures.rs: provides commonly used targets and protocol frames

use libclf::{Field, LocalTarget, RemoteTarget};

/// Decode a hex fixture; spaces may group the digits.
pub fn hex(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).unwrap()
}

/// A Type A response as a driver would report it. `None` leaves the field
/// unset.
pub fn tta_response(
    sens: &str,
    sel: Option<&str>,
    sdd: Option<&str>,
    rid: Option<&str>,
) -> RemoteTarget {
    let mut target = RemoteTarget::new("106A").unwrap().with(Field::SensRes, hex(sens));
    for (field, value) in [(Field::SelRes, sel), (Field::SddRes, sdd), (Field::RidRes, rid)] {
        if let Some(value) = value {
            target.set(field, hex(value));
        }
    }
    target
}

pub fn type1_tag() -> RemoteTarget {
    tta_response("000C", None, None, Some("1148B2565400"))
}

pub fn type2_tag() -> RemoteTarget {
    tta_response("4400", Some("00"), Some("0416C6C2D73881"), None)
}

pub fn type4b_card() -> RemoteTarget {
    RemoteTarget::new("106B")
        .unwrap()
        .with(Field::SensbRes, hex("50E8253EEC00000011008185"))
}

pub fn felica_card() -> RemoteTarget {
    RemoteTarget::new("212F")
        .unwrap()
        .with(Field::SensfRes, hex("01 0101010701260CCA 020F0D23042F7783 12FC"))
}

pub const ATR_REQ: &str = "D400 30313233343536373839 00000032 46666D010111";
pub const ATR_RES: &str = "D501 66F6E98D1C13DFE56BAD 0000000E32 46666D010111";

pub fn dep_request(brty: &str) -> RemoteTarget {
    RemoteTarget::new(brty).unwrap().with(Field::AtrReq, hex(ATR_REQ))
}

pub fn dep_response(brty: &str) -> RemoteTarget {
    RemoteTarget::new(brty).unwrap().with(Field::AtrRes, hex(ATR_RES))
}

/// Local Type 3 target ready to listen at 212F.
pub fn type3_local() -> LocalTarget {
    LocalTarget::new("212F")
        .unwrap()
        .with(Field::SensfRes, hex("01 02FE010203040506 FFFFFFFFFFFFFFFF 12FC"))
}

/// `type3_local` after a reader sent a Type 3 command.
pub fn type3_activated() -> LocalTarget {
    type3_local().with(Field::Tt3Cmd, hex("06 02FE010203040506 01 0B00 01 800000"))
}
