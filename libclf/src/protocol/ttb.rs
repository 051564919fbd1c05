// libclf/src/protocol/ttb.rs

//! NFC-B (Type B) request and response rules.

use crate::constants::*;
use crate::protocol::checks::{self, Verdict, reject};
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Field};
use crate::{Error, Result};

pub fn check_sense_request(target: &RemoteTarget) -> Result<()> {
    if let Some(sensb_req) = target.get(&Field::SensbReq) {
        checks::expect_len(sensb_req, &Field::SensbReq, SENSB_REQ_LEN)?;
    }
    Ok(())
}

/// SENSB_RES: 50h, 4 byte PUPI, application data and protocol info
/// (12 bytes, or 13 with the extended protocol info byte).
pub fn check_sense_response(res: &RemoteTarget) -> Verdict {
    let sensb_res = res
        .get(&Field::SensbRes)
        .ok_or_else(|| reject("SENSB Response Error (no response received)"))?;
    if !SENSB_RES_LENGTHS.contains(&sensb_res.len()) {
        return Err(reject("SENSB Response Format Error (wrong length)"));
    }
    if sensb_res[0] != SENSB_RES_CODE {
        return Err(reject("SENSB Response Format Error (wrong response code)"));
    }
    if checks::all_zero(&sensb_res[1..5]) {
        return Err(reject("SENSB Response Data Error (zero PUPI)"));
    }
    Ok(())
}

pub fn check_listen_request(target: &LocalTarget) -> Result<()> {
    if target.brty().bitrate() != BitRate::Kbps106 {
        return Err(Error::UnsupportedTarget(format!(
            "unsupported target bitrate: '{}'",
            target.brty()
        )));
    }
    let sensb_res = checks::required(target.get(&Field::SensbRes), &Field::SensbRes)?;
    checks::expect_len(sensb_res, &Field::SensbRes, LISTEN_SENSB_RES_LEN)?;
    checks::expect_first(sensb_res, &Field::SensbRes, SENSB_RES_CODE)?;
    Ok(())
}

/// Type B activation always ends in a Type 4 command.
pub fn check_listen_response(res: &LocalTarget) -> Verdict {
    if res.get(&Field::Tt4Cmd).is_none() {
        return Err(reject("Type B activation without tt4_cmd"));
    }
    Ok(())
}
