// libclf/src/lib.rs

//! libclf
//!
//! Contactless frontend core: bit-rate/technology parsing, target
//! descriptors, per-technology response validation and the connect loop
//! that drives a device driver.

pub mod connect;
pub mod constants;
pub mod driver;
pub mod error;
pub mod frontend;
pub mod prelude;
pub mod protocol;
pub mod target;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the value types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
