// libclf/src/driver/mock.rs

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::driver::traits::Driver;
use crate::protocol::Protocol;
use crate::target::{LocalTarget, RemoteTarget};
use crate::{CommunicationError, Error, Result};

/// A scripted reply for one mock exchange.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Found(T),
    Nothing,
    Communication(CommunicationError),
    Unsupported,
    Io,
    Interrupted,
}

impl<T> MockReply<T> {
    fn into_result(self, operation: &str) -> Result<Option<T>> {
        match self {
            Self::Found(t) => Ok(Some(t)),
            Self::Nothing => Ok(None),
            Self::Communication(e) => Err(Error::Communication(e)),
            Self::Unsupported => Err(Error::UnsupportedTarget(format!(
                "{} is not supported by the mock",
                operation
            ))),
            Self::Io => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                format!("{} lost the device", operation),
            ))),
            Self::Interrupted => Err(Error::Interrupted),
        }
    }
}

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Sense(Protocol, RemoteTarget),
    Listen(Protocol, LocalTarget, Duration),
    Mute,
    Close,
}

#[derive(Debug)]
struct Script<T> {
    queue: VecDeque<MockReply<T>>,
    fallback: MockReply<T>,
}

impl<T: Clone> Script<T> {
    fn next(&mut self) -> MockReply<T> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: MockReply::Nothing,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<Call>,
    sense: HashMap<Protocol, Script<RemoteTarget>>,
    listen: HashMap<Protocol, Script<LocalTarget>>,
    fail_close: bool,
}

/// Mock driver for tests. It records every call and answers from queued
/// replies, falling back to a per-protocol default (nothing found unless
/// configured otherwise).
///
/// Clones share state, so a test can keep one handle while the frontend
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a reply for the next sense call of `protocol`.
    pub fn push_sense(&self, protocol: Protocol, reply: MockReply<RemoteTarget>) {
        self.state()
            .sense
            .entry(protocol)
            .or_default()
            .queue
            .push_back(reply);
    }

    /// Reply used for sense calls of `protocol` once the queue is empty.
    pub fn set_sense(&self, protocol: Protocol, reply: MockReply<RemoteTarget>) {
        self.state().sense.entry(protocol).or_default().fallback = reply;
    }

    pub fn push_listen(&self, protocol: Protocol, reply: MockReply<LocalTarget>) {
        self.state()
            .listen
            .entry(protocol)
            .or_default()
            .queue
            .push_back(reply);
    }

    pub fn set_listen(&self, protocol: Protocol, reply: MockReply<LocalTarget>) {
        self.state().listen.entry(protocol).or_default().fallback = reply;
    }

    /// Make every sense and listen call fail the same way.
    pub fn fail_all(&self, reply_for: impl Fn() -> MockReply<()>) {
        for protocol in Protocol::ALL {
            self.set_sense(protocol, cast(reply_for()));
            self.set_listen(protocol, cast(reply_for()));
        }
    }

    /// Make `close` fail with an I/O error.
    pub fn set_close_failure(&self, fail: bool) {
        self.state().fail_close = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn sense_calls(&self, protocol: Protocol) -> Vec<RemoteTarget> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Sense(p, t) if *p == protocol => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn listen_calls(&self, protocol: Protocol) -> Vec<LocalTarget> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Listen(p, t, _) if *p == protocol => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of sense and listen exchanges, ignoring mute and close.
    pub fn exchange_count(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Sense(..) | Call::Listen(..)))
            .count()
    }

    pub fn mute_count(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Mute))
            .count()
    }

    fn sense(&mut self, protocol: Protocol, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        let mut state = self.state();
        state.calls.push(Call::Sense(protocol, target.clone()));
        let reply = state.sense.entry(protocol).or_default().next();
        reply.into_result(&format!("sense_{}", protocol))
    }

    fn listen(
        &mut self,
        protocol: Protocol,
        target: &LocalTarget,
        timeout: Duration,
    ) -> Result<Option<LocalTarget>> {
        let mut state = self.state();
        state.calls.push(Call::Listen(protocol, target.clone(), timeout));
        let reply = state.listen.entry(protocol).or_default().next();
        reply.into_result(&format!("listen_{}", protocol))
    }
}

fn cast<T>(reply: MockReply<()>) -> MockReply<T> {
    match reply {
        MockReply::Found(()) | MockReply::Nothing => MockReply::Nothing,
        MockReply::Communication(e) => MockReply::Communication(e),
        MockReply::Unsupported => MockReply::Unsupported,
        MockReply::Io => MockReply::Io,
        MockReply::Interrupted => MockReply::Interrupted,
    }
}

impl Driver for MockDriver {
    fn sense_tta(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        self.sense(Protocol::Tta, target)
    }

    fn sense_ttb(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        self.sense(Protocol::Ttb, target)
    }

    fn sense_ttf(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        self.sense(Protocol::Ttf, target)
    }

    fn sense_dep(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        self.sense(Protocol::Dep, target)
    }

    fn listen_tta(&mut self, target: &LocalTarget, timeout: Duration) -> Result<Option<LocalTarget>> {
        self.listen(Protocol::Tta, target, timeout)
    }

    fn listen_ttb(&mut self, target: &LocalTarget, timeout: Duration) -> Result<Option<LocalTarget>> {
        self.listen(Protocol::Ttb, target, timeout)
    }

    fn listen_ttf(&mut self, target: &LocalTarget, timeout: Duration) -> Result<Option<LocalTarget>> {
        self.listen(Protocol::Ttf, target, timeout)
    }

    fn listen_dep(&mut self, target: &LocalTarget, timeout: Duration) -> Result<Option<LocalTarget>> {
        self.listen(Protocol::Dep, target, timeout)
    }

    fn mute(&mut self) -> Result<()> {
        self.state().calls.push(Call::Mute);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Close);
        if state.fail_close {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "close failed",
            )));
        }
        Ok(())
    }
}
