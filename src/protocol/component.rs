//! Typed description payloads.
//!
//! A description response without a requested element carries either a
//! resource description or a connector self-description. Both are parsed
//! into [`DescribedComponent`]; properties the connector does not model
//! are kept verbatim, so serializing a component again yields the same
//! information.
//!
//! | `@type` (local name) | Component |
//! |----------------------|-----------|
//! | `Resource`, `DataResource` | [`DescribedComponent::Resource`] |
//! | `BaseConnector`, `TrustedConnector`, `Connector` | [`DescribedComponent::Connector`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Error, Result};

use super::kind::local_name;

// ============================================================================
// ComponentDeserializer
// ============================================================================

/// Parses a payload string into a typed component.
///
/// Implementations must return [`Error::UnrecognizedComponent`] when the
/// payload is not a component at all, and [`Error::InvalidResponse`] when
/// it claims to be one but cannot be read as such.
pub trait ComponentDeserializer: Send + Sync {
    /// Parses `payload`.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    fn parse(&self, payload: &str) -> Result<DescribedComponent>;
}

/// Default deserializer for JSON-LD description payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLdDeserializer;

impl ComponentDeserializer for JsonLdDeserializer {
    fn parse(&self, payload: &str) -> Result<DescribedComponent> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|_| Error::unrecognized_component("payload is not JSON"))?;

        let type_name = match &value {
            Value::Object(map) => map
                .get(NodeKeys::detect(map).type_name)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::unrecognized_component("JSON object without @type"))?
                .to_string(),
            other => {
                return Err(Error::unrecognized_component(format!(
                    "JSON {}",
                    json_kind(other)
                )));
            }
        };

        match ComponentKind::from_type_name(&type_name) {
            Some(ComponentKind::Resource) => serde_json::from_value(value)
                .map(DescribedComponent::Resource)
                .map_err(|e| Error::invalid_response(format!("Malformed {type_name}: {e}"))),
            Some(ComponentKind::Connector) => serde_json::from_value(value)
                .map(DescribedComponent::Connector)
                .map_err(|e| Error::invalid_response(format!("Malformed {type_name}: {e}"))),
            None => Err(Error::unrecognized_component(type_name)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// ComponentKind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentKind {
    Resource,
    Connector,
}

impl ComponentKind {
    fn from_type_name(type_name: &str) -> Option<Self> {
        match local_name(type_name) {
            "Resource" | "DataResource" => Some(Self::Resource),
            "BaseConnector" | "TrustedConnector" | "Connector" => Some(Self::Connector),
            _ => None,
        }
    }
}

// ============================================================================
// DescribedComponent
// ============================================================================

/// A resource description or a connector self-description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DescribedComponent {
    /// Description of a resource offered by the peer.
    Resource(ResourceDescription),
    /// Self-description of the peer connector.
    Connector(ConnectorDescription),
}

impl DescribedComponent {
    /// Returns the component `@id`.
    #[must_use]
    pub fn id(&self) -> &Url {
        match self {
            Self::Resource(r) => &r.id,
            Self::Connector(c) => &c.id,
        }
    }

    /// Returns the component `@type` as received.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Resource(r) => &r.type_name,
            Self::Connector(c) => &c.type_name,
        }
    }
}

/// Description of a resource.
///
/// Serializes back with the key spelling it was read with (`@id`/`@type`
/// or plain `id`/`type`).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescription {
    /// Resource identifier.
    pub id: Url,

    /// Type name as received (e.g. `ids:Resource`).
    pub type_name: String,

    /// All other properties, unchanged.
    pub properties: Map<String, Value>,

    keys: NodeKeys,
}

impl ResourceDescription {
    /// Creates a resource description with JSON-LD keys and no properties.
    #[must_use]
    pub fn new(id: Url, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            properties: Map::new(),
            keys: NodeKeys::default(),
        }
    }

    /// Returns the first title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        first_literal(&self.properties, &["ids:title", "title"])
    }

    /// Returns the first description text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        first_literal(&self.properties, &["ids:description", "description"])
    }

    /// Returns all keywords.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        literals(&self.properties, &["ids:keyword", "keyword"])
    }
}

/// Self-description of a connector.
///
/// Serializes back with the key spelling it was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorDescription {
    /// Connector identifier.
    pub id: Url,

    /// Type name as received (e.g. `ids:BaseConnector`).
    pub type_name: String,

    /// All other properties, unchanged.
    pub properties: Map<String, Value>,

    keys: NodeKeys,
}

impl ConnectorDescription {
    /// Creates a connector description with JSON-LD keys and no properties.
    #[must_use]
    pub fn new(id: Url, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            properties: Map::new(),
            keys: NodeKeys::default(),
        }
    }

    /// Returns the first title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        first_literal(&self.properties, &["ids:title", "title"])
    }

    /// Returns the connector's maintainer reference, if any.
    #[must_use]
    pub fn maintainer(&self) -> Option<&str> {
        reference(&self.properties, &["ids:maintainer", "maintainer"])
    }

    /// Returns the number of offered resource catalogs.
    #[must_use]
    pub fn catalog_count(&self) -> usize {
        ["ids:resourceCatalog", "resourceCatalog"]
            .iter()
            .find_map(|key| self.properties.get(*key))
            .map_or(0, |v| v.as_array().map_or(1, Vec::len))
    }
}

// ============================================================================
// Node Keys
// ============================================================================

/// Keys holding the identifier and type of a received node.
///
/// `@id` / `@type` win when present; plain `id` / `type` are used only in
/// their absence and otherwise stay ordinary properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeKeys {
    id: &'static str,
    type_name: &'static str,
}

impl Default for NodeKeys {
    fn default() -> Self {
        Self {
            id: "@id",
            type_name: "@type",
        }
    }
}

impl NodeKeys {
    fn detect(map: &Map<String, Value>) -> Self {
        let pick = |keyword: &'static str, plain: &'static str| {
            if !map.contains_key(keyword) && map.contains_key(plain) {
                plain
            } else {
                keyword
            }
        };

        Self {
            id: pick("@id", "id"),
            type_name: pick("@type", "type"),
        }
    }
}

/// Identifier, type and remaining properties of a node.
struct Node {
    id: Url,
    type_name: String,
    properties: Map<String, Value>,
    keys: NodeKeys,
}

impl Node {
    fn read(mut map: Map<String, Value>) -> StdResult<Self, String> {
        let keys = NodeKeys::detect(&map);

        let id = take_string(&mut map, keys.id)?;
        let id = Url::parse(&id).map_err(|e| format!("invalid `{}` '{id}': {e}", keys.id))?;
        let type_name = take_string(&mut map, keys.type_name)?;

        Ok(Self {
            id,
            type_name,
            properties: map,
            keys,
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> StdResult<String, String> {
    match map.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!(
            "`{key}` must be a string, found {}",
            json_kind(&other)
        )),
        None => Err(format!("missing field `{key}`")),
    }
}

fn write_node<S: Serializer>(
    serializer: S,
    id: &Url,
    type_name: &str,
    properties: &Map<String, Value>,
    keys: NodeKeys,
) -> StdResult<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(properties.len() + 2))?;
    map.serialize_entry(keys.id, id.as_str())?;
    map.serialize_entry(keys.type_name, type_name)?;
    for (key, value) in properties {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

impl Serialize for ResourceDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        write_node(serializer, &self.id, &self.type_name, &self.properties, self.keys)
    }
}

impl<'de> Deserialize<'de> for ResourceDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let node = Node::read(Map::deserialize(deserializer)?).map_err(de::Error::custom)?;
        Ok(Self {
            id: node.id,
            type_name: node.type_name,
            properties: node.properties,
            keys: node.keys,
        })
    }
}

impl Serialize for ConnectorDescription {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        write_node(serializer, &self.id, &self.type_name, &self.properties, self.keys)
    }
}

impl<'de> Deserialize<'de> for ConnectorDescription {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let node = Node::read(Map::deserialize(deserializer)?).map_err(de::Error::custom)?;
        Ok(Self {
            id: node.id,
            type_name: node.type_name,
            properties: node.properties,
            keys: node.keys,
        })
    }
}

// ============================================================================
// Literal Helpers
// ============================================================================

/// Reads a plain string, a `{"@value": ...}` literal, or the first entry of
/// an array of either.
fn literal_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("@value").and_then(Value::as_str),
        Value::Array(items) => items.iter().find_map(literal_text),
        _ => None,
    }
}

fn first_literal<'a>(properties: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| properties.get(*key))
        .and_then(literal_text)
}

fn literals<'a>(properties: &'a Map<String, Value>, keys: &[&str]) -> Vec<&'a str> {
    match keys.iter().find_map(|key| properties.get(*key)) {
        Some(Value::Array(items)) => items.iter().filter_map(literal_text).collect(),
        Some(other) => literal_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn reference<'a>(properties: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    match keys.iter().find_map(|key| properties.get(*key))? {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("@id").and_then(Value::as_str),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
