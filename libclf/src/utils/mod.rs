// libclf/src/utils/mod.rs
//! Small helpers shared across the crate: hex rendering for diagnostics and
//! the timing defaults used by the connect loop.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
