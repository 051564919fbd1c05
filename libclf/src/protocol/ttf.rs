// libclf/src/protocol/ttf.rs

//! NFC-F (Type F, 212/424 kbps) request and response rules.

use crate::constants::*;
use crate::protocol::checks::{self, Verdict, reject};
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Field};
use crate::{Error, Result};

/// SENSF_REQ is 00h, system code (2), request code and time slot number.
pub fn check_sense_request(target: &RemoteTarget) -> Result<()> {
    if let Some(sensf_req) = target.get(&Field::SensfReq) {
        checks::expect_len(sensf_req, &Field::SensfReq, SENSF_REQ_LEN)?;
    }
    Ok(())
}

/// SENSF_RES is 01h, NFCID2 (8), PAD (8) and an optional request data
/// field of 2 bytes.
pub fn check_sense_response(res: &RemoteTarget) -> Verdict {
    let sensf_res = res
        .get(&Field::SensfRes)
        .ok_or_else(|| reject("SENSF Response Error (no response received)"))?;
    if !SENSF_RES_LENGTHS.contains(&sensf_res.len()) {
        return Err(reject("SENSF Response Format Error (wrong length)"));
    }
    if sensf_res[0] != SENSF_RES_CODE {
        return Err(reject("SENSF Response Format Error (wrong response code)"));
    }
    if checks::all_zero(&sensf_res[1..9]) {
        return Err(reject("SENSF Response Data Error (zero NFCID2)"));
    }
    Ok(())
}

pub fn check_listen_request(target: &LocalTarget) -> Result<()> {
    if !matches!(target.brty().bitrate(), BitRate::Kbps212 | BitRate::Kbps424) {
        return Err(Error::UnsupportedTarget(format!(
            "unsupported target bitrate: '{}'",
            target.brty()
        )));
    }
    let sensf_res = checks::required(target.get(&Field::SensfRes), &Field::SensfRes)?;
    checks::expect_len(sensf_res, &Field::SensfRes, LISTEN_SENSF_RES_LEN)?;
    checks::expect_first(sensf_res, &Field::SensfRes, SENSF_RES_CODE)?;
    Ok(())
}

pub fn check_listen_response(res: &LocalTarget) -> Verdict {
    if res.get(&Field::Tt3Cmd).is_none() {
        return Err(reject("Type F activation without tt3_cmd"));
    }
    Ok(())
}
