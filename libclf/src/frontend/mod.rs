// libclf/src/frontend/mod.rs

//! The contactless frontend: owns the device handle and exposes sensing,
//! listening and the connect loop.

pub mod builder;
pub(crate) mod dispatch;

use std::time::Duration;

use log::{debug, warn};

use crate::driver::{Connector, Driver};
use crate::target::{LocalTarget, RemoteTarget};
use crate::{Error, Result};

pub use builder::{FrontendBuilder, FrontendConfig};

/// Frontend over one device handle.
///
/// The handle is exclusively owned; only one sense or listen exchange is
/// in flight at a time. Dropping the frontend closes the device.
#[derive(Default)]
pub struct ContactlessFrontend {
    pub(crate) driver: Option<Box<dyn Driver>>,
    connector: Option<Box<dyn Connector>>,
    path: Option<String>,
}

impl ContactlessFrontend {
    /// Open the device at `path` through `connector`.
    ///
    /// Fails with `Error::DeviceNotPresent` when nothing could be opened.
    pub fn new<C: Connector + 'static>(connector: C, path: &str) -> Result<Self> {
        FrontendBuilder::new()
            .connector(connector)
            .path(path)
            .build()
    }

    /// Wrap an already opened driver.
    pub fn with_driver<D: Driver + 'static>(driver: D) -> Self {
        Self {
            driver: Some(Box::new(driver)),
            connector: None,
            path: None,
        }
    }

    pub fn builder() -> FrontendBuilder {
        FrontendBuilder::new()
    }

    pub(crate) fn from_parts(
        driver: Option<Box<dyn Driver>>,
        connector: Option<Box<dyn Connector>>,
    ) -> Self {
        Self {
            driver,
            connector,
            path: None,
        }
    }

    /// Open the device at `path`, closing any device opened before.
    ///
    /// Returns whether a device was found. An empty path is a caller
    /// error; a connector failure is logged and reported as `false`.
    pub fn open(&mut self, path: &str) -> Result<bool> {
        if path.is_empty() {
            return Err(Error::InvalidValue(
                "argument *path* must not be empty".to_string(),
            ));
        }
        self.close();

        let Some(connector) = self.connector.as_mut() else {
            warn!("no connector to open '{}'", path);
            return Ok(false);
        };

        match connector.connect(path) {
            Ok(Some(driver)) => {
                debug!("opened '{}'", path);
                self.driver = Some(driver);
                self.path = Some(path.to_string());
                Ok(true)
            }
            Ok(None) => {
                warn!("no device found at '{}'", path);
                Ok(false)
            }
            Err(Error::Interrupted) => Err(Error::Interrupted),
            Err(e) => {
                warn!("failed to open '{}': {}", path, e);
                Ok(false)
            }
        }
    }

    /// Open the path named by a configuration document.
    pub fn open_config(&mut self, config: &FrontendConfig) -> Result<bool> {
        self.open(&config.path)
    }

    /// Release the device. Errors while closing are logged and dropped.
    pub fn close(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            if let Err(e) = driver.close() {
                debug!("ignoring error on close: {}", e);
            }
        }
        self.path = None;
    }

    pub fn is_open(&self) -> bool {
        self.driver.is_some()
    }

    /// Path of the open device, if it was opened through a connector.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(crate) fn device(&mut self) -> Result<&mut (dyn Driver + 'static)> {
        self.driver.as_deref_mut().ok_or(Error::DeviceNotPresent)
    }

    /// Discover a remote target.
    ///
    /// Candidates are tried in order and the first response that passes
    /// validation is returned. An empty list returns `None` without using
    /// the device. `Error::UnsupportedTarget` is raised only when no
    /// candidate names a technology this crate or the driver can handle.
    pub fn sense(&mut self, targets: &[RemoteTarget]) -> Result<Option<RemoteTarget>> {
        let driver = self.device()?;
        Ok(dispatch::dispatch(driver, targets, Duration::ZERO)?.found())
    }

    /// Present `target` and wait up to `timeout` for an initiator to
    /// activate it.
    pub fn listen(&mut self, target: &LocalTarget, timeout: Duration) -> Result<Option<LocalTarget>> {
        let driver = self.device()?;
        Ok(dispatch::dispatch(driver, std::slice::from_ref(target), timeout)?.found())
    }
}

impl Drop for ContactlessFrontend {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ContactlessFrontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactlessFrontend")
            .field("open", &self.is_open())
            .field("path", &self.path)
            .finish()
    }
}
