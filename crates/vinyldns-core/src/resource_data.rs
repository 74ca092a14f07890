//! The attribute bag exchanged with the declarative-resource framework
//!
//! A [`ResourceData`] carries the resource identity plus a flat JSON object
//! of attributes. Lifecycle controllers never look attributes up by key:
//! they [`decode`](ResourceData::decode) the bag into a typed attribute
//! struct, work on that, and [`merge`](ResourceData::merge) the result back.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Identity and attributes of one resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Remote identity; empty when no remote object backs this resource
    #[serde(default)]
    pub id: String,

    /// Attribute name to value
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceData {
    /// Create a bag without identity from user-supplied attributes
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    /// Create a bag that only carries an identity (import, refresh by ID)
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Build a bag from a JSON object of attributes
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(attributes) => Ok(Self::new(attributes)),
            other => Err(Error::validation(format!(
                "attributes must be a JSON object, got: {other}"
            ))),
        }
    }

    /// Current identity
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether a remote object backs this resource
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Record the remote identity
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Forget the remote identity; the framework will plan a re-create
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// Raw attribute value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Non-empty string attribute
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Set a single attribute
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Deserialize the attributes into a typed struct
    ///
    /// Null attributes are treated as absent so that `#[serde(default)]`
    /// applies to them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a required attribute is missing
    /// or has the wrong shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let present: Map<String, Value> = self
            .attributes
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        serde_json::from_value(Value::Object(present))
            .map_err(|e| Error::validation(format!("invalid attributes: {e}")))
    }

    /// Serialize a typed struct and overwrite the attributes it carries
    ///
    /// Attributes absent from the serialized form are left untouched; an
    /// attribute serialized as null overwrites the stored value with null.
    pub fn merge<T: Serialize>(&mut self, typed: &T) -> Result<()> {
        match serde_json::to_value(typed)? {
            Value::Object(map) => {
                self.attributes.extend(map);
                Ok(())
            }
            other => Err(Error::Other(format!(
                "attributes must serialize to an object, got: {other}"
            ))),
        }
    }
}
