//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockDriver setup so tests across the
//! crate and tests/ directory can reuse the same targets and frontends.
#![allow(dead_code)]

use crate::Result;
use crate::driver::{Driver, MockDriver};
use crate::frontend::ContactlessFrontend;
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Brty, Field, RateType, Technology};
use crate::utils::parse_hex;

fn hex(s: &str) -> Vec<u8> {
    parse_hex(s).unwrap_or_default()
}

fn remote(bitrate: BitRate, technology: Technology) -> RemoteTarget {
    RemoteTarget::from_brty(Brty::symmetric(RateType::new(bitrate, technology)))
}

/// Frontend owning one handle of a fresh MockDriver; the other handle is
/// returned for scripting replies and inspecting calls.
#[doc(hidden)]
pub fn mock_frontend() -> (ContactlessFrontend, MockDriver) {
    let mock = MockDriver::new();
    (ContactlessFrontend::with_driver(mock.clone()), mock)
}

/// Connector opening `mock` for paths starting with `usb` and finding
/// nothing elsewhere.
#[doc(hidden)]
pub fn usb_connector(
    mock: MockDriver,
) -> impl FnMut(&str) -> Result<Option<Box<dyn Driver>>> + Send + 'static {
    move |path: &str| -> Result<Option<Box<dyn Driver>>> {
        if path.starts_with("usb") {
            let driver: Box<dyn Driver> = Box::new(mock.clone());
            Ok(Some(driver))
        } else {
            Ok(None)
        }
    }
}

/// Type 2 tag with a 7 byte UID as a driver reports it after SEL_RES.
#[doc(hidden)]
pub fn tta_response() -> RemoteTarget {
    remote(BitRate::Kbps106, Technology::A)
        .with(Field::SensRes, hex("4400"))
        .with(Field::SddRes, hex("04 112233445566"))
        .with(Field::SelRes, hex("00"))
}

/// Type 1 tag answering RID instead of anti-collision.
#[doc(hidden)]
pub fn t1t_response() -> RemoteTarget {
    remote(BitRate::Kbps106, Technology::A)
        .with(Field::SensRes, hex("000C"))
        .with(Field::RidRes, hex("1148 B2565400"))
}

/// Type B card with a 12 byte SENSB_RES.
#[doc(hidden)]
pub fn ttb_response() -> RemoteTarget {
    remote(BitRate::Kbps106, Technology::B)
        .with(Field::SensbRes, hex("50 30702A1C 00000000 00 7181"))
}

/// Type 3 card with a 17 byte SENSF_RES (no request data).
#[doc(hidden)]
pub fn ttf_response() -> RemoteTarget {
    remote(BitRate::Kbps212, Technology::F)
        .with(Field::SensfRes, hex("01 0102030405060708 F1F2F3F4F5F6F7F8"))
}

/// Local Type 3 target with a valid 19 byte SENSF_RES.
#[doc(hidden)]
pub fn ttf_local() -> LocalTarget {
    LocalTarget::from_rate(RateType::new(BitRate::Kbps212, Technology::F))
        .with(Field::SensfRes, hex("01 02FE010203040506 FFFFFFFFFFFFFFFF 12FC"))
}

/// `ttf_local` as activated by a Type 3 command.
#[doc(hidden)]
pub fn ttf_activated() -> LocalTarget {
    ttf_local().with(Field::Tt3Cmd, hex("06 02FE010203040506 01 0B00 01 800000"))
}
