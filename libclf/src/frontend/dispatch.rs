// libclf/src/frontend/dispatch.rs

//! Candidate dispatch shared by `sense`, `listen` and the connect loop.

use std::fmt;
use std::time::Duration;

use log::debug;

use crate::driver::Driver;
use crate::protocol::{Protocol, Verdict};
use crate::target::{LocalTarget, RemoteTarget};
use crate::{CommunicationError, Error, Result};

/// A target that can be tried against the device: remote targets are
/// sensed, local targets are listened for.
pub(crate) trait Candidate: Clone + fmt::Display + Sized {
    const VERB: &'static str;

    fn protocol(&self) -> Result<Protocol>;

    fn check_request(&self, protocol: Protocol) -> Result<()>;

    fn exchange(
        &self,
        protocol: Protocol,
        driver: &mut dyn Driver,
        timeout: Duration,
    ) -> Result<Option<Self>>;

    fn check_response(protocol: Protocol, res: &Self) -> Verdict;
}

impl Candidate for RemoteTarget {
    const VERB: &'static str = "sense";

    fn protocol(&self) -> Result<Protocol> {
        Protocol::for_sense(self)
    }

    fn check_request(&self, protocol: Protocol) -> Result<()> {
        protocol.check_sense_request(self)
    }

    fn exchange(
        &self,
        protocol: Protocol,
        driver: &mut dyn Driver,
        _timeout: Duration,
    ) -> Result<Option<Self>> {
        protocol.sense(driver, self)
    }

    fn check_response(protocol: Protocol, res: &Self) -> Verdict {
        protocol.check_sense_response(res)
    }
}

impl Candidate for LocalTarget {
    const VERB: &'static str = "listen";

    fn protocol(&self) -> Result<Protocol> {
        Protocol::for_listen(self)
    }

    fn check_request(&self, protocol: Protocol) -> Result<()> {
        protocol.check_listen_request(self)
    }

    fn exchange(
        &self,
        protocol: Protocol,
        driver: &mut dyn Driver,
        timeout: Duration,
    ) -> Result<Option<Self>> {
        protocol.listen(driver, self, timeout)
    }

    fn check_response(protocol: Protocol, res: &Self) -> Verdict {
        protocol.check_listen_response(res)
    }
}

/// Result of one dispatch round.
#[derive(Debug)]
pub(crate) enum Dispatch<T> {
    Found(T),
    /// Nothing answered, or every answer was discarded.
    NotFound,
    /// Every usable candidate failed with a communication error.
    Failed(Error),
}

impl<T> Dispatch<T> {
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Dispatch<U> {
        match self {
            Self::Found(t) => Dispatch::Found(f(t)),
            Self::NotFound => Dispatch::NotFound,
            Self::Failed(e) => Dispatch::Failed(e),
        }
    }

    /// Turn a found target into `NotFound` unless `keep` accepts it.
    pub(crate) fn filter(self, keep: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Found(t) if !keep(&t) => Self::NotFound,
            other => other,
        }
    }

    /// Collapse to the public sense/listen result. A round that only
    /// failed is reported as absence.
    pub(crate) fn found(self) -> Option<T> {
        match self {
            Self::Found(t) => Some(t),
            Self::NotFound => None,
            Self::Failed(e) => {
                debug!("no target: {}", e);
                None
            }
        }
    }
}

/// Select a protocol for every candidate and run its request check.
///
/// Malformed requests fail the whole call. Candidates the crate has no
/// protocol for are kept as `Err` so the caller can skip them.
pub(crate) fn plan<T: Candidate>(candidates: &[T]) -> Result<Vec<Result<Protocol>>> {
    candidates
        .iter()
        .map(|target| {
            let checked = target
                .protocol()
                .and_then(|protocol| target.check_request(protocol).map(|()| protocol));
            match checked {
                Ok(protocol) => Ok(Ok(protocol)),
                Err(e @ Error::UnsupportedTarget(_)) => Ok(Err(e)),
                Err(e) => Err(e),
            }
        })
        .collect()
}

/// Try `candidates` in order and return the first accepted response.
///
/// The RF field is muted once before the round. Responses rejected by the
/// validator are discarded and the next candidate is tried.
pub(crate) fn dispatch<T: Candidate>(
    driver: &mut dyn Driver,
    candidates: &[T],
    timeout: Duration,
) -> Result<Dispatch<T>> {
    if candidates.is_empty() {
        return Ok(Dispatch::NotFound);
    }

    let mut usable = Vec::with_capacity(candidates.len());
    let mut unsupported = None;
    for (target, planned) in candidates.iter().zip(plan(candidates)?) {
        match planned {
            Ok(protocol) => usable.push((target, protocol)),
            Err(e) => {
                debug!("skip {}: {}", target, e);
                unsupported.get_or_insert(e);
            }
        }
    }
    if let Some(e) = unsupported.filter(|_| usable.is_empty()) {
        return Err(e);
    }

    driver.mute()?;

    let mut answered = false;
    let mut failure: Option<CommunicationError> = None;
    let mut refused = None;
    for (target, protocol) in usable {
        debug!("{}_{} {}", T::VERB, protocol, target);
        match target.exchange(protocol, driver, timeout) {
            Ok(Some(res)) => match T::check_response(protocol, &res) {
                Ok(()) => {
                    debug!("{}_{} found {}", T::VERB, protocol, res);
                    return Ok(Dispatch::Found(res));
                }
                Err(reason) => {
                    debug!("{}_{} discarded {}: {}", T::VERB, protocol, res, reason);
                    answered = true;
                }
            },
            Ok(None) | Err(Error::Communication(CommunicationError::Timeout)) => answered = true,
            Err(Error::Communication(e)) => {
                debug!("{}_{} failed: {}", T::VERB, protocol, e);
                failure = Some(e);
            }
            Err(e @ Error::UnsupportedTarget(_)) => {
                debug!("{}_{} refused: {}", T::VERB, protocol, e);
                refused.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }

    if answered {
        return Ok(Dispatch::NotFound);
    }
    match (failure, refused) {
        (Some(e), _) => Ok(Dispatch::Failed(e.into())),
        (None, Some(e)) => Err(e),
        (None, None) => Ok(Dispatch::NotFound),
    }
}
