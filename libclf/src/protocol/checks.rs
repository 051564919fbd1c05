// libclf/src/protocol/checks.rs

//! Small bounds-checking helpers shared by the per-protocol validators.
//!
//! Request checks raise `Error::InvalidValue` because a malformed request is
//! a caller bug. Response checks return a `Verdict` whose error is a
//! protocol-level `CommunicationError`; the dispatcher logs it and treats the
//! response as absent.

use crate::types::Field;
use crate::{CommunicationError, Error, Result};

/// Outcome of a response check.
pub type Verdict = std::result::Result<(), CommunicationError>;

pub(crate) fn reject(reason: &str) -> CommunicationError {
    CommunicationError::Protocol(reason.to_string())
}

/// Fetch a field a request must carry.
pub(crate) fn required<'a>(value: Option<&'a [u8]>, field: &Field) -> Result<&'a [u8]> {
    value.ok_or_else(|| Error::InvalidValue(format!("{} is required", field)))
}

/// Require an exact request field length.
pub(crate) fn expect_len(data: &[u8], field: &Field, len: usize) -> Result<()> {
    if data.len() != len {
        return Err(Error::InvalidValue(format!("{} must be {} byte", field, len)));
    }
    Ok(())
}

/// Require a request field length within `min..=max`, naming the violated
/// bound.
pub(crate) fn expect_len_between(data: &[u8], field: &Field, min: usize, max: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidValue(format!(
            "minimum {} length is {} byte",
            field, min
        )));
    }
    if data.len() > max {
        return Err(Error::InvalidValue(format!(
            "maximum {} length is {} byte",
            field, max
        )));
    }
    Ok(())
}

/// Require the first byte of a request field.
pub(crate) fn expect_first(data: &[u8], field: &Field, code: u8) -> Result<()> {
    if data.first() != Some(&code) {
        return Err(Error::InvalidValue(format!("{}[0] must be {:02X}h", field, code)));
    }
    Ok(())
}

/// True for an identifier that carries no information.
pub(crate) fn all_zero(data: &[u8]) -> bool {
    data.iter().all(|&b| b == 0)
}
