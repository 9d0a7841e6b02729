//! The key/value object flowing through a normalization pass.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

use crate::core::NormalizeError;
use crate::schema::TypeTag;

/// An ordered string-keyed object plus a normalized marker.
///
/// The marker is never serialized, so a normalized config written to disk and
/// read back is processed again, while a config handed straight back to
/// [`Schema::normalize`](crate::schema::Schema::normalize) short-circuits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    map: Map<String, Value>,
    normalized: bool,
}

impl Config {
    /// An empty, unnormalized config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value. Anything but an object is a hard error.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(NormalizeError::NotAnObject {
                found: TypeTag::of(&other).to_string(),
            }),
        }
    }

    /// Whether this config came out of a normalization pass.
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub(crate) fn mark_normalized(&mut self) {
        self.normalized = true;
    }

    /// The underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    /// Consume into the underlying map, dropping the marker.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Consume into a JSON object value, dropping the marker.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }

    /// A JSON object value copy of the map.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.map.clone())
    }
}

impl From<Map<String, Value>> for Config {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            map,
            normalized: false,
        }
    }
}

impl TryFrom<Value> for Config {
    type Error = NormalizeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl Deref for Config {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

impl DerefMut for Config {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.map
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}
