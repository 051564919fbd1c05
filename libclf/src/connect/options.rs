// libclf/src/connect/options.rs

use std::fmt;
use std::time::Duration;

use crate::target::{LocalTarget, RemoteTarget, Target};

/// Invoked once before a mode starts; may edit the candidates or veto the
/// mode by returning `false`.
pub type StartupHook<T> = Box<dyn FnMut(&mut Vec<T>) -> bool>;

/// Invoked with an accepted target.
pub type TargetHook = Box<dyn FnMut(&Target) -> bool>;

/// Process-wide stop predicate, evaluated after every attempt.
pub type TerminateHook = Box<dyn FnMut() -> bool>;

/// Options for one connect mode.
///
/// An empty `targets` list is replaced by the mode's default candidates
/// before `on_startup` runs. `iterations` of `None` loops until a target
/// is connected or `terminate` returns true.
pub struct ModeOptions<T> {
    pub targets: Vec<T>,
    pub iterations: Option<u32>,
    pub interval: Option<Duration>,
    pub timeout: Option<Duration>,
    pub on_startup: Option<StartupHook<T>>,
    pub on_discover: Option<TargetHook>,
    pub on_connect: Option<TargetHook>,
}

/// Reader/writer mode options.
pub type ReaderOptions = ModeOptions<RemoteTarget>;

/// Card-emulation mode options.
pub type CardOptions = ModeOptions<LocalTarget>;

impl<T> Default for ModeOptions<T> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            iterations: None,
            interval: None,
            timeout: None,
            on_startup: None,
            on_discover: None,
            on_connect: None,
        }
    }
}

impl<T> ModeOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: T) -> Self {
        self.targets.push(target);
        self
    }

    pub fn targets<I: IntoIterator<Item = T>>(mut self, targets: I) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Minimum time between the starts of two attempts.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Listen timeout per attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn on_startup(mut self, f: impl FnMut(&mut Vec<T>) -> bool + 'static) -> Self {
        self.on_startup = Some(Box::new(f));
        self
    }

    /// Returning `false` ignores the target and keeps looping.
    pub fn on_discover(mut self, f: impl FnMut(&Target) -> bool + 'static) -> Self {
        self.on_discover = Some(Box::new(f));
        self
    }

    /// Returning `true` ends the connect with the target; `false` keeps
    /// looping.
    pub fn on_connect(mut self, f: impl FnMut(&Target) -> bool + 'static) -> Self {
        self.on_connect = Some(Box::new(f));
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for ModeOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeOptions")
            .field("targets", &self.targets)
            .field("iterations", &self.iterations)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .field("on_startup", &self.on_startup.is_some())
            .field("on_discover", &self.on_discover.is_some())
            .field("on_connect", &self.on_connect.is_some())
            .finish()
    }
}

/// Which side of a peer link this device plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Target,
}

/// Peer-link mode options.
///
/// Without a `role` the loop alternates between initiator and target
/// attempts, starting as initiator. `mode.targets` are the DEP candidates
/// sensed as initiator; `local` is presented as target.
#[derive(Debug, Default)]
pub struct PeerOptions {
    pub role: Option<Role>,
    pub mode: ModeOptions<RemoteTarget>,
    pub local: Option<LocalTarget>,
}

impl PeerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn local(mut self, target: LocalTarget) -> Self {
        self.local = Some(target);
        self
    }

    pub fn mode(mut self, mode: ModeOptions<RemoteTarget>) -> Self {
        self.mode = mode;
        self
    }
}

impl From<ModeOptions<RemoteTarget>> for PeerOptions {
    fn from(mode: ModeOptions<RemoteTarget>) -> Self {
        Self::new().mode(mode)
    }
}

/// Options for `ContactlessFrontend::connect`.
///
/// Modes run in the order llcp, rdwr, card.
#[derive(Default)]
pub struct ConnectOptions {
    pub llcp: Option<PeerOptions>,
    pub rdwr: Option<ReaderOptions>,
    pub card: Option<CardOptions>,
    pub terminate: Option<TerminateHook>,
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn llcp(mut self, options: impl Into<PeerOptions>) -> Self {
        self.llcp = Some(options.into());
        self
    }

    pub fn rdwr(mut self, options: ReaderOptions) -> Self {
        self.rdwr = Some(options);
        self
    }

    pub fn card(mut self, options: CardOptions) -> Self {
        self.card = Some(options);
        self
    }

    pub fn terminate(mut self, f: impl FnMut() -> bool + 'static) -> Self {
        self.terminate = Some(Box::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.llcp.is_none() && self.rdwr.is_none() && self.card.is_none()
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("llcp", &self.llcp)
            .field("rdwr", &self.rdwr)
            .field("card", &self.card)
            .field("terminate", &self.terminate.is_some())
            .finish()
    }
}
