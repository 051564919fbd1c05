// libclf/src/driver/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{Call, MockDriver, MockReply};
pub use traits::{Connector, Driver};
