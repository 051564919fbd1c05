// libclf/src/target/remote.rs

use std::fmt;

use crate::Result;
use crate::target::FieldSet;
use crate::types::{Brty, Field, RateType};

/// A target discovered while this device acts as initiator.
///
/// The send/receive rate-types are fixed at construction; protocol fields
/// may be filled in later by the driver or by session code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    brty: Brty,
    fields: FieldSet,
}

impl RemoteTarget {
    /// Parse `<rate><tech>[/<rate><tech>]`, e.g. `"106A"` or `"106A/212F"`.
    pub fn new(brty: &str) -> Result<Self> {
        Ok(Self::from_brty(brty.parse()?))
    }

    pub fn from_brty(brty: Brty) -> Self {
        Self {
            brty,
            fields: FieldSet::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, field: impl Into<Field>, value: impl Into<Vec<u8>>) -> Self {
        self.set(field, value);
        self
    }

    /// The send rate-type.
    pub fn brty(&self) -> RateType {
        self.brty.send
    }

    pub fn brty_send(&self) -> RateType {
        self.brty.send
    }

    pub fn brty_recv(&self) -> RateType {
        self.brty.recv
    }

    pub fn rates(&self) -> Brty {
        self.brty
    }

    pub fn get(&self, field: &Field) -> Option<&[u8]> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<Field>, value: impl Into<Vec<u8>>) {
        self.fields.set(field.into(), value.into());
    }

    pub fn unset(&mut self, field: &Field) -> Option<Vec<u8>> {
        self.fields.remove(field)
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.brty)?;
        if !self.fields.is_empty() {
            write!(f, " {}", self.fields)?;
        }
        Ok(())
    }
}
