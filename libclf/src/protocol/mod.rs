// libclf/src/protocol/mod.rs

//! Per-technology request checks, driver calls and response validation.
//!
//! Each supported technology is a `Protocol` variant; the per-technology
//! rules live in `protocol::<name>.rs` and are dispatched here.

pub mod checks;
pub mod dep;
pub mod tta;
pub mod ttb;
pub mod ttf;

use std::fmt;
use std::time::Duration;

use crate::driver::Driver;
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::{Field, Technology};
use crate::{Error, Result};

pub use checks::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tta,
    Ttb,
    Ttf,
    Dep,
}

impl Protocol {
    pub const ALL: [Protocol; 4] = [Self::Tta, Self::Ttb, Self::Ttf, Self::Dep];

    /// Select the protocol for sensing a remote target. A target carrying
    /// an ATR_REQ is sensed with DEP regardless of its technology letter.
    pub fn for_sense(target: &RemoteTarget) -> Result<Self> {
        if target.get(&Field::AtrReq).is_some() {
            return Ok(Self::Dep);
        }
        Self::for_technology(target.brty().technology(), &target.rates().to_string())
    }

    /// Select the protocol for listening as a local target. A target
    /// carrying an ATR_RES listens for DEP activation.
    pub fn for_listen(target: &LocalTarget) -> Result<Self> {
        if target.get(&Field::AtrRes).is_some() {
            return Ok(Self::Dep);
        }
        Self::for_technology(target.brty().technology(), &target.brty().to_string())
    }

    fn for_technology(technology: Technology, brty: &str) -> Result<Self> {
        match technology {
            Technology::A => Ok(Self::Tta),
            Technology::B => Ok(Self::Ttb),
            Technology::F => Ok(Self::Ttf),
            Technology::Other(_) => Err(Error::UnsupportedTarget(format!(
                "unknown technology type in '{}'",
                brty
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tta => "tta",
            Self::Ttb => "ttb",
            Self::Ttf => "ttf",
            Self::Dep => "dep",
        }
    }

    /// Reject a malformed caller-built request before the driver is used.
    pub fn check_sense_request(&self, target: &RemoteTarget) -> Result<()> {
        match self {
            Self::Tta => tta::check_sense_request(target),
            Self::Ttb => ttb::check_sense_request(target),
            Self::Ttf => ttf::check_sense_request(target),
            Self::Dep => dep::check_sense_request(target),
        }
    }

    pub fn sense(&self, driver: &mut dyn Driver, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        match self {
            Self::Tta => driver.sense_tta(target),
            Self::Ttb => driver.sense_ttb(target),
            Self::Ttf => driver.sense_ttf(target),
            Self::Dep => driver.sense_dep(target),
        }
    }

    pub fn check_sense_response(&self, res: &RemoteTarget) -> Verdict {
        match self {
            Self::Tta => tta::check_sense_response(res),
            Self::Ttb => ttb::check_sense_response(res),
            Self::Ttf => ttf::check_sense_response(res),
            Self::Dep => dep::check_sense_response(res),
        }
    }

    pub fn check_listen_request(&self, target: &LocalTarget) -> Result<()> {
        match self {
            Self::Tta => tta::check_listen_request(target),
            Self::Ttb => ttb::check_listen_request(target),
            Self::Ttf => ttf::check_listen_request(target),
            Self::Dep => dep::check_listen_request(target),
        }
    }

    pub fn listen(
        &self,
        driver: &mut dyn Driver,
        target: &LocalTarget,
        timeout: Duration,
    ) -> Result<Option<LocalTarget>> {
        match self {
            Self::Tta => driver.listen_tta(target, timeout),
            Self::Ttb => driver.listen_ttb(target, timeout),
            Self::Ttf => driver.listen_ttf(target, timeout),
            Self::Dep => driver.listen_dep(target, timeout),
        }
    }

    pub fn check_listen_response(&self, res: &LocalTarget) -> Verdict {
        match self {
            Self::Tta => tta::check_listen_response(res),
            Self::Ttb => ttb::check_listen_response(res),
            Self::Ttf => ttf::check_listen_response(res),
            Self::Dep => dep::check_listen_response(res),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
