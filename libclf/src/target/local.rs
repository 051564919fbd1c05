// libclf/src/target/local.rs

use std::fmt;

use crate::target::FieldSet;
use crate::types::{BitRate, Brty, Field, RateType, Technology};
use crate::{Error, Result};

/// A target this device presents while acting as card or DEP target.
///
/// Only one rate-type applies, so a two-leg grammar string is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTarget {
    brty: RateType,
    fields: FieldSet,
}

impl LocalTarget {
    pub fn new(brty: &str) -> Result<Self> {
        let parsed: Brty = brty.parse()?;
        if brty.contains('/') {
            return Err(Error::Pattern(brty.to_string()));
        }
        Ok(Self::from_rate(parsed.send))
    }

    pub fn from_rate(brty: RateType) -> Self {
        Self {
            brty,
            fields: FieldSet::new(),
        }
    }

    pub fn with(mut self, field: impl Into<Field>, value: impl Into<Vec<u8>>) -> Self {
        self.set(field, value);
        self
    }

    pub fn brty(&self) -> RateType {
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

impl Default for LocalTarget {
    fn default() -> Self {
        Self::from_rate(RateType::new(BitRate::Kbps106, Technology::A))
    }
}

impl fmt::Display for LocalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.brty)?;
        if !self.fields.is_empty() {
            write!(f, " {}", self.fields)?;
        }
        Ok(())
    }
}
