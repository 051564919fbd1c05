// libclf/src/frontend/builder.rs

use serde_json::Value;

use crate::driver::{Connector, Driver};
use crate::frontend::ContactlessFrontend;
use crate::{Error, Result};

/// Helper to construct a ContactlessFrontend with optional configuration.
#[derive(Default)]
pub struct FrontendBuilder {
    connector: Option<Box<dyn Connector>>,
    driver: Option<Box<dyn Driver>>,
    path: Option<String>,
}

impl FrontendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector used to open device paths, now and on later `open` calls.
    pub fn connector<C: Connector + 'static>(mut self, connector: C) -> Self {
        self.connector = Some(Box::new(connector));
        self
    }

    /// Provide an already-opened driver (e.g. MockDriver).
    pub fn driver<D: Driver + 'static>(mut self, driver: D) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    /// Path to open on `build`. Takes precedence over `driver`.
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn config(self, config: FrontendConfig) -> Self {
        self.path(&config.path)
    }

    /// Consume the builder. When a path was given it must open, otherwise
    /// `Error::DeviceNotPresent` is returned.
    pub fn build(self) -> Result<ContactlessFrontend> {
        let mut clf = ContactlessFrontend::from_parts(self.driver, self.connector);
        if let Some(path) = self.path {
            if !clf.open(&path)? {
                return Err(Error::DeviceNotPresent);
            }
        }
        Ok(clf)
    }
}

/// Device selection read from a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    pub path: String,
}

impl FrontendConfig {
    /// Accepts either a bare path string or an object with a `path` key.
    pub fn from_json(value: &Value) -> Result<Self> {
        let path = match value {
            Value::Object(map) => map.get("path"),
            other => Some(other),
        };
        match path {
            Some(Value::String(path)) => Ok(Self { path: path.clone() }),
            _ => Err(Error::InvalidType(
                "expecting a string type argument *path*".to_string(),
            )),
        }
    }
}
