// libclf/src/connect/mod.rs

//! The connect loop: interleaves the configured modes in order llcp, rdwr,
//! card and hands the first accepted target to the caller's hooks.
//!
//! Every round makes one dispatch attempt per mode that still has
//! iterations left. After each round the `terminate` predicate is
//! evaluated; a true result ends the whole connect with
//! `ConnectOutcome::Absent`. A mode whose iterations are used up sits out
//! the remaining rounds.

pub mod config;
pub mod defaults;
pub mod options;

use std::fmt;
use std::slice;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::driver::Driver;
use crate::frontend::ContactlessFrontend;
use crate::frontend::dispatch::{self, Candidate, Dispatch};
use crate::target::{LocalTarget, RemoteTarget, Target};
use crate::utils::{default_interval, default_listen_timeout, remaining};
use crate::{Error, Result};

pub use options::{
    CardOptions, ConnectOptions, ModeOptions, PeerOptions, ReaderOptions, Role, StartupHook,
    TargetHook, TerminateHook,
};

/// How a connect run ended.
#[derive(Debug)]
pub enum ConnectOutcome {
    /// A target was accepted by the mode's hooks.
    Connected(Target),
    /// No target: modes vetoed, iterations used up, or `terminate`
    /// returned true.
    Absent,
    /// An attempt failed at the device level.
    Aborted(Error),
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }

    pub fn target(&self) -> Option<&Target> {
        match self {
            Self::Connected(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_target(self) -> Option<Target> {
        match self {
            Self::Connected(t) => Some(t),
            _ => None,
        }
    }
}

/// Loop parameters and hooks shared by all modes once started.
struct Policy {
    name: &'static str,
    iterations: Option<u32>,
    interval: Duration,
    on_discover: Option<TargetHook>,
    on_connect: Option<TargetHook>,
}

impl Policy {
    fn new<T>(name: &'static str, options: &mut ModeOptions<T>) -> Self {
        Self {
            name,
            iterations: options.iterations.map(|n| n.max(1)),
            interval: options.interval.unwrap_or_else(default_interval),
            on_discover: options.on_discover.take(),
            on_connect: options.on_connect.take(),
        }
    }

    /// Run the hooks for an accepted target. Without hooks every target is
    /// accepted.
    fn accept(&mut self, target: &Target) -> bool {
        if let Some(on_discover) = self.on_discover.as_mut() {
            if !on_discover(target) {
                debug!("{}: on_discover ignored {}", self.name, target);
                return false;
            }
        }
        match self.on_connect.as_mut() {
            Some(on_connect) => on_connect(target),
            None => true,
        }
    }
}

fn run_startup<T>(name: &str, options: &mut ModeOptions<T>) -> bool {
    if let Some(on_startup) = options.on_startup.as_mut() {
        if !on_startup(&mut options.targets) {
            info!("{}: mode vetoed by on_startup", name);
            return false;
        }
    }
    if options.targets.is_empty() {
        info!("{}: no targets left after on_startup", name);
        return false;
    }
    true
}

fn check_candidates<T: Candidate>(candidates: &[T]) -> Result<()> {
    dispatch::plan(candidates).map(|_| ())
}

struct PeerRun {
    role: Option<Role>,
    targets: Vec<RemoteTarget>,
    local: LocalTarget,
    timeout: Duration,
}

struct ReaderRun {
    targets: Vec<RemoteTarget>,
}

struct CardRun {
    targets: Vec<LocalTarget>,
    timeout: Duration,
}

impl PeerRun {
    fn start(mut options: PeerOptions) -> Option<Mode> {
        if options.mode.targets.is_empty() {
            options.mode.targets = defaults::peer_targets();
        }
        if !run_startup("llcp", &mut options.mode) {
            return None;
        }
        let policy = Policy::new("llcp", &mut options.mode);
        let run = Self {
            role: options.role,
            local: options.local.unwrap_or_else(defaults::peer_local_target),
            timeout: options.mode.timeout.unwrap_or_else(default_listen_timeout),
            targets: options.mode.targets,
        };
        Some(Mode::new(Run::Peer(run), policy))
    }

    fn check(&self) -> Result<()> {
        if self.role != Some(Role::Target) {
            check_candidates(&self.targets)?;
        }
        if self.role != Some(Role::Initiator) {
            check_candidates(slice::from_ref(&self.local))?;
        }
        Ok(())
    }

    fn initiates(role: Option<Role>, round: u32) -> bool {
        match role {
            Some(Role::Initiator) => true,
            Some(Role::Target) => false,
            None => round % 2 == 0,
        }
    }

    fn attempt(&self, driver: &mut dyn Driver, round: u32) -> Result<Dispatch<Target>> {
        if Self::initiates(self.role, round) {
            let found = dispatch::dispatch(driver, &self.targets, Duration::ZERO)?;
            Ok(found
                .filter(|t| keep_llcp(t, defaults::is_llcp_remote))
                .map(Target::Remote))
        } else {
            let found = dispatch::dispatch(driver, slice::from_ref(&self.local), self.timeout)?;
            Ok(found
                .filter(|t| keep_llcp(t, defaults::is_llcp_local))
                .map(Target::Local))
        }
    }
}

fn keep_llcp<T: fmt::Display>(target: &T, is_llcp: fn(&T) -> bool) -> bool {
    let keep = is_llcp(target);
    if !keep {
        debug!("llcp: discarded {} without LLCP general bytes", target);
    }
    keep
}

impl ReaderRun {
    fn start(mut options: ReaderOptions) -> Option<Mode> {
        if options.targets.is_empty() {
            options.targets = defaults::reader_targets();
        }
        if !run_startup("rdwr", &mut options) {
            return None;
        }
        let policy = Policy::new("rdwr", &mut options);
        let run = Self {
            targets: options.targets,
        };
        Some(Mode::new(Run::Reader(run), policy))
    }

    fn attempt(&self, driver: &mut dyn Driver) -> Result<Dispatch<Target>> {
        Ok(dispatch::dispatch(driver, &self.targets, Duration::ZERO)?.map(Target::Remote))
    }
}

impl CardRun {
    fn start(mut options: CardOptions) -> Option<Mode> {
        if options.targets.is_empty() {
            options.targets = vec![defaults::card_target()];
        }
        if !run_startup("card", &mut options) {
            return None;
        }
        let policy = Policy::new("card", &mut options);
        let run = Self {
            timeout: options.timeout.unwrap_or_else(default_listen_timeout),
            targets: options.targets,
        };
        Some(Mode::new(Run::Card(run), policy))
    }

    fn attempt(&self, driver: &mut dyn Driver) -> Result<Dispatch<Target>> {
        Ok(dispatch::dispatch(driver, &self.targets, self.timeout)?.map(Target::Local))
    }
}

enum Run {
    Peer(PeerRun),
    Reader(ReaderRun),
    Card(CardRun),
}

impl Run {
    fn check(&self) -> Result<()> {
        match self {
            Self::Peer(run) => run.check(),
            Self::Reader(run) => check_candidates(&run.targets),
            Self::Card(run) => check_candidates(&run.targets),
        }
    }

    fn attempt(&self, driver: &mut dyn Driver, round: u32) -> Result<Dispatch<Target>> {
        match self {
            Self::Peer(run) => run.attempt(driver, round),
            Self::Reader(run) => run.attempt(driver),
            Self::Card(run) => run.attempt(driver),
        }
    }
}

/// A started mode with its own attempt counter and pacing.
struct Mode {
    run: Run,
    policy: Policy,
    rounds: u32,
    last_started: Option<Instant>,
}

impl Mode {
    fn new(run: Run, policy: Policy) -> Self {
        Self {
            run,
            policy,
            rounds: 0,
            last_started: None,
        }
    }

    fn exhausted(&self) -> bool {
        self.policy.iterations.is_some_and(|n| self.rounds >= n)
    }

    /// One attempt of this mode. Attempts of the same mode start at least
    /// `interval` apart; time spent in other modes counts towards it.
    fn step(&mut self, driver: &mut dyn Driver) -> Result<Option<Target>> {
        if let Some(last) = self.last_started {
            thread::sleep(remaining(self.policy.interval, last));
        }
        self.last_started = Some(Instant::now());

        let round = self.rounds;
        self.rounds = self.rounds.saturating_add(1);
        if self.exhausted() {
            debug!("{}: {} iterations done", self.policy.name, self.rounds);
        }

        match self.run.attempt(driver, round)? {
            Dispatch::Found(target) if self.policy.accept(&target) => {
                debug!("{}: connected {}", self.policy.name, target);
                Ok(Some(target))
            }
            Dispatch::Found(_) | Dispatch::NotFound => Ok(None),
            Dispatch::Failed(e) => Err(e),
        }
    }
}

/// Give every mode with attempts left one attempt per round until a target
/// is accepted, the caller terminates, or all modes are used up.
fn run_rounds(
    driver: &mut dyn Driver,
    modes: &mut [Mode],
    terminate: &mut Option<TerminateHook>,
) -> Result<Option<Target>> {
    loop {
        let mut attempted = false;
        for mode in modes.iter_mut().filter(|m| !m.exhausted()) {
            attempted = true;
            if let Some(target) = mode.step(driver)? {
                return Ok(Some(target));
            }
        }
        if !attempted {
            return Ok(None);
        }
        if terminate.as_mut().is_some_and(|stop| stop()) {
            debug!("connect terminated by caller");
            return Ok(None);
        }
    }
}

impl ContactlessFrontend {
    /// Discover or present targets according to `options` until one is
    /// accepted.
    ///
    /// Each round gives one attempt to every started mode, in order llcp,
    /// rdwr, card. Caller errors (no device, malformed candidates) are
    /// returned as `Err` before the device is used. Device-level failures
    /// during the loop end the run with `ConnectOutcome::Aborted`.
    pub fn connect(&mut self, options: ConnectOptions) -> Result<ConnectOutcome> {
        let driver = self.device()?;
        let ConnectOptions {
            llcp,
            rdwr,
            card,
            mut terminate,
        } = options;

        let mut modes: Vec<Mode> = [
            llcp.and_then(PeerRun::start),
            rdwr.and_then(ReaderRun::start),
            card.and_then(CardRun::start),
        ]
        .into_iter()
        .flatten()
        .collect();
        for mode in &modes {
            mode.run.check()?;
        }

        match run_rounds(driver, &mut modes, &mut terminate) {
            Ok(Some(target)) => Ok(ConnectOutcome::Connected(target)),
            Ok(None) => Ok(ConnectOutcome::Absent),
            Err(e) if e.aborts_connect() => {
                info!("connect aborted: {}", e);
                Ok(ConnectOutcome::Aborted(e))
            }
            Err(e) => Err(e),
        }
    }

    /// `connect` with options read from a configuration document.
    pub fn connect_json(&mut self, doc: &serde_json::Value) -> Result<ConnectOutcome> {
        let options = ConnectOptions::from_json(doc)?;
        self.connect(options)
    }
}
