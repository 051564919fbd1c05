// libclf/src/connect/defaults.rs

//! Candidates used when connect options leave `targets` empty, and the
//! LLCP checks applied to peer-link targets.

use rand::RngCore;

use crate::constants::*;
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Brty, Field, RateType, Technology};

const NFCID3_LEN: usize = 10;

/// DEP parameters: DID 0, no BS/BR, PP with LR=3 (254 byte frames) and
/// general bytes present.
const ATR_REQ_PARAMS: [u8; 4] = [0x00, 0x00, 0x00, 0x32];
/// As above plus a TO of 0Eh.
const ATR_RES_PARAMS: [u8; 5] = [0x00, 0x00, 0x00, 0x0E, 0x32];

const SENSF_RES_PAD: [u8; 8] = [0xFF; 8];

fn rate(bitrate: BitRate, technology: Technology) -> RateType {
    RateType::new(bitrate, technology)
}

fn remote(rate: RateType) -> RemoteTarget {
    RemoteTarget::from_brty(Brty::symmetric(rate))
}

/// Fresh identifier bytes for NFCID fields.
fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

fn llcp_general_bytes() -> Vec<u8> {
    let mut gb = LLCP_MAGIC.to_vec();
    gb.extend_from_slice(&LLCP_VERSION_TLV);
    gb
}

/// ATR_REQ announcing LLCP with a fresh NFCID3.
pub fn atr_req() -> Vec<u8> {
    let mut atr = ATR_REQ_CMD.to_vec();
    atr.extend(random_bytes(NFCID3_LEN));
    atr.extend_from_slice(&ATR_REQ_PARAMS);
    atr.extend(llcp_general_bytes());
    atr
}

pub fn atr_res() -> Vec<u8> {
    let mut atr = ATR_RES_CMD.to_vec();
    atr.extend(random_bytes(NFCID3_LEN));
    atr.extend_from_slice(&ATR_RES_PARAMS);
    atr.extend(llcp_general_bytes());
    atr
}

/// SENSF_RES for NFCID2 `02FE` plus six random bytes and the given
/// system code.
pub fn sensf_res(system_code: [u8; 2]) -> Vec<u8> {
    let mut res = vec![SENSF_RES_CODE, 0x02, 0xFE];
    res.extend(random_bytes(6));
    res.extend_from_slice(&SENSF_RES_PAD);
    res.extend_from_slice(&system_code);
    res
}

/// Reader/writer candidates: Type A, Type B and Type F at their base rates.
pub fn reader_targets() -> Vec<RemoteTarget> {
    vec![
        remote(rate(BitRate::Kbps106, Technology::A)),
        remote(rate(BitRate::Kbps106, Technology::B)),
        remote(rate(BitRate::Kbps212, Technology::F)),
    ]
}

/// Peer-link initiator candidates at every DEP rate, sharing one ATR_REQ.
pub fn peer_targets() -> Vec<RemoteTarget> {
    let atr_req = atr_req();
    [
        rate(BitRate::Kbps106, Technology::A),
        rate(BitRate::Kbps212, Technology::F),
        rate(BitRate::Kbps424, Technology::F),
    ]
    .into_iter()
    .map(|rt| remote(rt).with(Field::AtrReq, atr_req.clone()))
    .collect()
}

/// Local DEP target answering Type A or Type F activation with an LLCP
/// ATR_RES.
pub fn peer_local_target() -> LocalTarget {
    let mut sdd_res = vec![LISTEN_SDD_RES_PREFIX];
    sdd_res.extend(random_bytes(LISTEN_SDD_RES_LEN - 1));
    LocalTarget::from_rate(rate(BitRate::Kbps106, Technology::A))
        .with(Field::SensRes, vec![0x01, 0x01])
        .with(Field::SddRes, sdd_res)
        .with(Field::SelRes, vec![0x40])
        .with(Field::SensfRes, sensf_res([0xFF, 0xFF]))
        .with(Field::AtrRes, atr_res())
}

/// Type 3 card at 212 kbps advertising the NDEF system code.
pub fn card_target() -> LocalTarget {
    LocalTarget::from_rate(rate(BitRate::Kbps212, Technology::F))
        .with(Field::SensfRes, sensf_res(NDEF_SYSTEM_CODE))
}

fn has_llcp_magic(atr: &[u8], offset: usize) -> bool {
    atr.get(offset..).is_some_and(|gb| gb.starts_with(&LLCP_MAGIC))
}

/// General bytes of a remote ATR_RES start after byte 17.
pub fn is_llcp_remote(target: &RemoteTarget) -> bool {
    target
        .get(&Field::AtrRes)
        .is_some_and(|atr| has_llcp_magic(atr, ATR_RES_MIN_LEN))
}

/// General bytes of the initiator's ATR_REQ start after byte 16.
pub fn is_llcp_local(target: &LocalTarget) -> bool {
    target
        .get(&Field::AtrReq)
        .is_some_and(|atr| has_llcp_magic(atr, ATR_REQ_MIN_LEN))
}
