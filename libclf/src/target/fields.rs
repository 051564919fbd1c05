// libclf/src/target/fields.rs

use std::collections::BTreeMap;
use std::fmt;

use crate::types::Field;
use crate::utils::bytes_to_hex;

/// Open set of named byte buffers carried by a target.
///
/// A field that was never set is absent; there is no default buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeMap<Field, Vec<u8>>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &Field) -> Option<&[u8]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &Field) -> bool {
        self.0.contains_key(field)
    }

    /// Store a value, returning the previous one if the field was set.
    pub fn set(&mut self, field: Field, value: Vec<u8>) -> Option<Vec<u8>> {
        self.0.insert(field, value)
    }

    pub fn remove(&mut self, field: &Field) -> Option<Vec<u8>> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &[u8])> {
        self.0.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Field, Vec<u8>)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (Field, Vec<u8>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", field, bytes_to_hex(value))?;
        }
        Ok(())
    }
}
