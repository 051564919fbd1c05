// libclf/src/driver/traits.rs

use std::time::Duration;

use crate::target::{LocalTarget, RemoteTarget};
use crate::{Error, Result};

fn unsupported(operation: &str, brty: impl std::fmt::Display) -> Error {
    Error::UnsupportedTarget(format!("{} is not supported for '{}'", operation, brty))
}

/// Device boundary: one exchange per call, per technology and direction.
///
/// A call returns `Ok(None)` when nothing answered. Radio faults are
/// reported as `Error::Communication`, requests the hardware cannot realise
/// as `Error::UnsupportedTarget`. Every default implementation reports the
/// operation as unsupported so a driver only implements what its hardware
/// does.
pub trait Driver: Send {
    fn sense_tta(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        Err(unsupported("sense_tta", target.rates()))
    }

    fn sense_ttb(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        Err(unsupported("sense_ttb", target.rates()))
    }

    fn sense_ttf(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        Err(unsupported("sense_ttf", target.rates()))
    }

    fn sense_dep(&mut self, target: &RemoteTarget) -> Result<Option<RemoteTarget>> {
        Err(unsupported("sense_dep", target.rates()))
    }

    fn listen_tta(&mut self, target: &LocalTarget, _timeout: Duration) -> Result<Option<LocalTarget>> {
        Err(unsupported("listen_tta", target.brty()))
    }

    fn listen_ttb(&mut self, target: &LocalTarget, _timeout: Duration) -> Result<Option<LocalTarget>> {
        Err(unsupported("listen_ttb", target.brty()))
    }

    fn listen_ttf(&mut self, target: &LocalTarget, _timeout: Duration) -> Result<Option<LocalTarget>> {
        Err(unsupported("listen_ttf", target.brty()))
    }

    fn listen_dep(&mut self, target: &LocalTarget, _timeout: Duration) -> Result<Option<LocalTarget>> {
        Err(unsupported("listen_dep", target.brty()))
    }

    /// Switch the RF field off between rounds.
    fn mute(&mut self) -> Result<()> {
        Ok(())
    }

    /// Release the hardware handle.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Resolves a device path (e.g. `usb:054c:06c1`, `tty:USB0`) into a driver.
///
/// `Ok(None)` means no device answered at that path.
pub trait Connector: Send {
    fn connect(&mut self, path: &str) -> Result<Option<Box<dyn Driver>>>;
}

impl<F> Connector for F
where
    F: FnMut(&str) -> Result<Option<Box<dyn Driver>>> + Send,
{
    fn connect(&mut self, path: &str) -> Result<Option<Box<dyn Driver>>> {
        self(path)
    }
}
