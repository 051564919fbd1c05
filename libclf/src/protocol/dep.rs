// libclf/src/protocol/dep.rs

//! NFC-DEP (peer data exchange) rules. DEP runs on top of Type A at
//! 106 kbps or Type F at 212/424 kbps and is selected whenever a remote
//! target carries an ATR_REQ or a local target carries an ATR_RES.

use crate::constants::*;
use crate::protocol::checks::{self, Verdict, reject};
use crate::protocol::{tta, ttf};
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Field, RateType, Technology};
use crate::{Error, Result};

fn check_rate(brty: RateType) -> Result<()> {
    match (brty.bitrate(), brty.technology()) {
        (BitRate::Kbps106, Technology::A) => Ok(()),
        (BitRate::Kbps212 | BitRate::Kbps424, Technology::F) => Ok(()),
        _ => Err(Error::UnsupportedTarget(format!(
            "unsupported bitrate/type for DEP: '{}'",
            brty
        ))),
    }
}

pub fn check_sense_request(target: &RemoteTarget) -> Result<()> {
    let atr_req = checks::required(target.get(&Field::AtrReq), &Field::AtrReq)?;
    checks::expect_len_between(atr_req, &Field::AtrReq, ATR_REQ_MIN_LEN, ATR_REQ_MAX_LEN)?;
    check_rate(target.brty())
}

pub fn check_sense_response(res: &RemoteTarget) -> Verdict {
    let atr_res = res
        .get(&Field::AtrRes)
        .ok_or_else(|| reject("ATR Response Error (no response received)"))?;
    if atr_res.len() < ATR_RES_MIN_LEN || atr_res.len() > ATR_RES_MAX_LEN {
        return Err(reject("ATR Response Format Error (wrong length)"));
    }
    if atr_res[..2] != ATR_RES_CMD {
        return Err(reject("ATR Response Format Error (wrong command code)"));
    }
    Ok(())
}

/// A local DEP target must also be answerable at the technology level it
/// is activated through.
pub fn check_listen_request(target: &LocalTarget) -> Result<()> {
    let atr_res = checks::required(target.get(&Field::AtrRes), &Field::AtrRes)?;
    checks::expect_len_between(atr_res, &Field::AtrRes, ATR_RES_MIN_LEN, ATR_RES_MAX_LEN)?;
    check_rate(target.brty())?;
    match target.brty().technology() {
        Technology::A => tta::check_listen_request(target),
        _ => ttf::check_listen_request(target),
    }
}

/// The activated local target carries the initiator's ATR_REQ.
pub fn check_listen_response(res: &LocalTarget) -> Verdict {
    let atr_req = res
        .get(&Field::AtrReq)
        .ok_or_else(|| reject("DEP activation without atr_req"))?;
    if atr_req.len() < ATR_REQ_MIN_LEN || atr_req.len() > ATR_REQ_MAX_LEN {
        return Err(reject("ATR Request Format Error (wrong length)"));
    }
    if atr_req[..2] != ATR_REQ_CMD {
        return Err(reject("ATR Request Format Error (wrong command code)"));
    }
    Ok(())
}
