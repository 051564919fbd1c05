// libclf/src/error.rs

use thiserror::Error;

/// Radio-level failures reported by a driver for a single exchange.
///
/// These are transient: the dispatcher treats them as "no target found"
/// for the candidate that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommunicationError {
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("transmission error: {0}")]
    Transmission(String),

    #[error("timeout error")]
    Timeout,

    #[error("broken link")]
    BrokenLink,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("no such device")]
    DeviceNotPresent,

    #[error("brty pattern does not match for '{0}'")]
    Pattern(String),

    /// Malformed field length or option value.
    #[error("{0}")]
    InvalidValue(String),

    /// Argument of the wrong shape.
    #[error("{0}")]
    InvalidType(String),

    #[error("{0}")]
    UnsupportedTarget(String),

    #[error(transparent)]
    Communication(#[from] CommunicationError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("interrupted")]
    Interrupted,
}

impl Error {
    pub fn is_communication(&self) -> bool {
        matches!(self, Error::Communication(_))
    }

    /// Faults that end a connect run with a failure indicator instead of
    /// propagating to the caller. Validation faults are not among them.
    pub fn aborts_connect(&self) -> bool {
        matches!(
            self,
            Error::Communication(_)
                | Error::UnsupportedTarget(_)
                | Error::Io(_)
                | Error::Interrupted
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
