// libclf/src/target/mod.rs

//! Target descriptors shared by sensing and listening.

use std::fmt;

use crate::types::{Field, RateType};

mod fields;
mod local;
mod remote;

pub use fields::FieldSet;
pub use local::LocalTarget;
pub use remote::RemoteTarget;

/// A target handed to session callbacks: either a remote target found by
/// sensing or the local target activated by listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Remote(RemoteTarget),
    Local(LocalTarget),
}

impl Target {
    /// The send rate-type for remote targets, the only one for local ones.
    pub fn brty(&self) -> RateType {
        match self {
            Self::Remote(t) => t.brty(),
            Self::Local(t) => t.brty(),
        }
    }

    pub fn get(&self, field: &Field) -> Option<&[u8]> {
        match self {
            Self::Remote(t) => t.get(field),
            Self::Local(t) => t.get(field),
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteTarget> {
        match self {
            Self::Remote(t) => Some(t),
            Self::Local(_) => None,
        }
    }

    pub fn as_local(&self) -> Option<&LocalTarget> {
        match self {
            Self::Local(t) => Some(t),
            Self::Remote(_) => None,
        }
    }
}

impl From<RemoteTarget> for Target {
    fn from(t: RemoteTarget) -> Self {
        Self::Remote(t)
    }
}

impl From<LocalTarget> for Target {
    fn from(t: LocalTarget) -> Self {
        Self::Local(t)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(t) => write!(f, "{}", t),
            Self::Local(t) => write!(f, "{}", t),
        }
    }
}
