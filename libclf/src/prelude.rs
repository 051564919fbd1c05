// libclf/src/prelude.rs

pub use crate::connect::{
    CardOptions, ConnectOptions, ConnectOutcome, ModeOptions, PeerOptions, ReaderOptions, Role,
};
pub use crate::driver::{Connector, Driver};
pub use crate::frontend::{ContactlessFrontend, FrontendBuilder, FrontendConfig};
pub use crate::protocol::Protocol;
pub use crate::target::{LocalTarget, RemoteTarget, Target};
pub use crate::{BitRate, Brty, CommunicationError, Error, Field, RateType, Result, Technology};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, ms, parse_hex, print_data};
