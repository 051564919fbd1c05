// libclf/src/protocol/tta.rs

//! NFC-A (Type A, 106 kbps) request and response rules.

use crate::constants::*;
use crate::protocol::checks::{self, Verdict, reject};
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{BitRate, Field};
use crate::{Error, Result};

/// A caller-supplied SEL_REQ must address a 4, 7 or 10 byte UID.
pub fn check_sense_request(target: &RemoteTarget) -> Result<()> {
    if let Some(sel_req) = target.get(&Field::SelReq) {
        if !SEL_REQ_LENGTHS.contains(&sel_req.len()) {
            return Err(Error::InvalidValue(
                "sel_req must be 4, 7, or 10 byte".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate a sensed Type A target.
///
/// SENS_RES byte 0 decides the shape of the rest: a Type 1 tag (no
/// anti-collision bits) must answer RID with a 6 byte RID_RES, any other
/// tag must have completed anti-collision with an SDD_RES whose length
/// matches the UID size bits and a one byte SEL_RES.
pub fn check_sense_response(res: &RemoteTarget) -> Verdict {
    let sens_res = res
        .get(&Field::SensRes)
        .ok_or_else(|| reject("SENS Response Error (no response received)"))?;
    if sens_res.len() != SENS_RES_LEN {
        return Err(reject("SENS Response Format Error (wrong length)"));
    }

    if sens_res[0] & SENS_RES_ANTICOLLISION_MASK == 0 {
        check_type1(res, sens_res)
    } else {
        check_anticollision(res, sens_res)
    }
}

fn check_type1(res: &RemoteTarget, sens_res: &[u8]) -> Verdict {
    if sens_res[1] & 0x0F != T1T_PLATFORM_CONFIG {
        return Err(reject("SENS Response Data Error (T1T config)"));
    }
    let rid_res = res
        .get(&Field::RidRes)
        .ok_or_else(|| reject("RID Response Error (no response received)"))?;
    if rid_res.len() != RID_RES_LEN {
        return Err(reject("RID Response Format Error (wrong length)"));
    }
    if rid_res[0] >> 4 != RID_RES_HR0_NIBBLE {
        return Err(reject("RID Response Data Error (invalid HR0)"));
    }
    if checks::all_zero(&rid_res[2..]) {
        return Err(reject("RID Response Data Error (zero UID)"));
    }
    Ok(())
}

fn check_anticollision(res: &RemoteTarget, sens_res: &[u8]) -> Verdict {
    if res.get(&Field::RidRes).is_some() {
        return Err(reject("RID Response Error (not expected after anti-collision)"));
    }

    let uid_size = usize::from(sens_res[0] >> 6);
    let uid_len = *NFCID1_LENGTHS
        .get(uid_size)
        .ok_or_else(|| reject("SENS Response Data Error (RFU UID size)"))?;

    let sdd_res = res
        .get(&Field::SddRes)
        .ok_or_else(|| reject("SDD Response Error (no response received)"))?;
    if sdd_res.len() != uid_len {
        return Err(reject("SDD Response Format Error (UID size mismatch)"));
    }
    if checks::all_zero(sdd_res) {
        return Err(reject("SDD Response Data Error (zero UID)"));
    }

    let sel_res = res
        .get(&Field::SelRes)
        .ok_or_else(|| reject("SEL Response Error (no response received)"))?;
    if sel_res.len() != SEL_RES_LEN {
        return Err(reject("SEL Response Format Error (wrong length)"));
    }
    Ok(())
}

/// A local Type A target answers at 106 kbps with a complete
/// SENS_RES/SDD_RES/SEL_RES set.
pub fn check_listen_request(target: &LocalTarget) -> Result<()> {
    if target.brty().bitrate() != BitRate::Kbps106 {
        return Err(Error::UnsupportedTarget(format!(
            "unsupported target bitrate: '{}'",
            target.brty()
        )));
    }

    let sens_res = checks::required(target.get(&Field::SensRes), &Field::SensRes)?;
    let sdd_res = checks::required(target.get(&Field::SddRes), &Field::SddRes)?;
    let sel_res = checks::required(target.get(&Field::SelRes), &Field::SelRes)?;

    checks::expect_len(sens_res, &Field::SensRes, SENS_RES_LEN)?;
    checks::expect_len(sdd_res, &Field::SddRes, LISTEN_SDD_RES_LEN)?;
    checks::expect_len(sel_res, &Field::SelRes, SEL_RES_LEN)?;
    checks::expect_first(sdd_res, &Field::SddRes, LISTEN_SDD_RES_PREFIX)?;
    Ok(())
}

/// An activated Type A target must have received a Type 2 or Type 4
/// command.
pub fn check_listen_response(res: &LocalTarget) -> Verdict {
    if res.get(&Field::Tt2Cmd).is_none() && res.get(&Field::Tt4Cmd).is_none() {
        return Err(reject("Type A activation without tt2_cmd or tt4_cmd"));
    }
    Ok(())
}
