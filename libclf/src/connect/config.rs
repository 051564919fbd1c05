// libclf/src/connect/config.rs

//! Connect options from a JSON configuration document.
//!
//! ```json
//! {
//!   "rdwr": { "targets": ["106A", "212F"], "iterations": 5, "interval": 0.2 },
//!   "card": { "targets": [{ "brty": "212F", "sensf_res": "01 02FE..." }], "timeout": 1.5 },
//!   "llcp": { "role": "initiator" }
//! }
//! ```
//!
//! Callbacks cannot be expressed in JSON; attach them to the parsed options.

use std::time::Duration;

use log::debug;
use serde_json::{Map, Value};

use crate::connect::options::{ConnectOptions, ModeOptions, PeerOptions, Role};
use crate::target::{LocalTarget, RemoteTarget};
use crate::types::Field;
use crate::utils::{parse_hex, secs_f64};
use crate::{Error, Result};

const MODE_KEYS: [&str; 3] = ["llcp", "rdwr", "card"];

/// A target type that can be described in a configuration document.
trait ConfigTarget: Sized {
    fn parse(brty: &str) -> Result<Self>;
    fn assign(&mut self, field: Field, value: Vec<u8>);
}

impl ConfigTarget for RemoteTarget {
    fn parse(brty: &str) -> Result<Self> {
        RemoteTarget::new(brty)
    }

    fn assign(&mut self, field: Field, value: Vec<u8>) {
        self.set(field, value);
    }
}

impl ConfigTarget for LocalTarget {
    fn parse(brty: &str) -> Result<Self> {
        LocalTarget::new(brty)
    }

    fn assign(&mut self, field: Field, value: Vec<u8>) {
        self.set(field, value);
    }
}

fn invalid(mode: &str, key: &str, expected: &str) -> Error {
    Error::InvalidValue(format!("{}.{} must be {}", mode, key, expected))
}

fn parse_target<T: ConfigTarget>(mode: &str, value: &Value) -> Result<T> {
    match value {
        Value::String(brty) => T::parse(brty),
        Value::Object(map) => {
            let brty = map
                .get("brty")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid(mode, "targets", "strings or objects with a 'brty' string"))?;
            let mut target = T::parse(brty)?;
            for (name, hex) in map.iter().filter(|(name, _)| name.as_str() != "brty") {
                let text = hex
                    .as_str()
                    .ok_or_else(|| invalid(mode, name, "a hex string"))?;
                let bytes = parse_hex(text)
                    .map_err(|e| Error::InvalidValue(format!("{}.{}: {}", mode, name, e)))?;
                target.assign(Field::from(name.as_str()), bytes);
            }
            Ok(target)
        }
        _ => Err(invalid(mode, "targets", "strings or objects with a 'brty' string")),
    }
}

fn parse_secs(mode: &str, key: &str, value: &Value) -> Result<Duration> {
    value
        .as_f64()
        .and_then(secs_f64)
        .ok_or_else(|| invalid(mode, key, "a non-negative number of seconds"))
}

fn parse_mode<T: ConfigTarget>(mode: &str, map: &Map<String, Value>) -> Result<ModeOptions<T>> {
    let mut options = ModeOptions::new();
    for (key, value) in map {
        match key.as_str() {
            "targets" => {
                let list = value
                    .as_array()
                    .ok_or_else(|| invalid(mode, key, "an array"))?;
                options.targets = list
                    .iter()
                    .map(|v| parse_target(mode, v))
                    .collect::<Result<Vec<T>>>()?;
            }
            "iterations" => {
                let n = value
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| invalid(mode, key, "a non-negative integer"))?;
                options.iterations = Some(n);
            }
            "interval" => options.interval = Some(parse_secs(mode, key, value)?),
            "timeout" => options.timeout = Some(parse_secs(mode, key, value)?),
            // handled by the caller
            "role" if mode == "llcp" => {}
            other => debug!("ignoring unknown option '{}.{}'", mode, other),
        }
    }
    Ok(options)
}

fn parse_role(value: Option<&Value>) -> Result<Option<Role>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s == "initiator" => Ok(Some(Role::Initiator)),
        Some(Value::String(s)) if s == "target" => Ok(Some(Role::Target)),
        Some(_) => Err(invalid("llcp", "role", "'initiator' or 'target'")),
    }
}

fn mode_map<'a>(doc: &'a Map<String, Value>, key: &str) -> Result<Option<&'a Map<String, Value>>> {
    match doc.get(key) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(Error::InvalidType(format!(
            "argument '{}' must be a dictionary",
            key
        ))),
    }
}

impl ConnectOptions {
    /// Build options from a configuration document.
    ///
    /// Every mode value is checked to be an object before anything else is
    /// parsed, so a shape error is reported without side effects.
    pub fn from_json(doc: &Value) -> Result<Self> {
        let doc = doc.as_object().ok_or_else(|| {
            Error::InvalidType("connect options must be a dictionary".to_string())
        })?;

        let llcp = mode_map(doc, "llcp")?;
        let rdwr = mode_map(doc, "rdwr")?;
        let card = mode_map(doc, "card")?;
        for key in doc.keys().filter(|k| !MODE_KEYS.contains(&k.as_str())) {
            debug!("ignoring unknown connect option '{}'", key);
        }

        let mut options = ConnectOptions::new();
        if let Some(map) = llcp {
            options.llcp = Some(PeerOptions {
                role: parse_role(map.get("role"))?,
                mode: parse_mode("llcp", map)?,
                local: None,
            });
        }
        if let Some(map) = rdwr {
            options.rdwr = Some(parse_mode("rdwr", map)?);
        }
        if let Some(map) = card {
            options.card = Some(parse_mode("card", map)?);
        }
        Ok(options)
    }
}
