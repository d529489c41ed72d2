//! Widget instances: placed copies of a registry type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Unique identifier of a placed widget.
///
/// Freshly generated ids look like `AgentChatWidget-3f2a…` (type name plus
/// a random v4 UUID). Ids loaded from storage are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Generates a new id for an instance of `widget_type`.
    pub fn generate(widget_type: &str) -> Self {
        Self(format!("{widget_type}-{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for InstanceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for InstanceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Per-instance settings bag.
///
/// The store never looks inside; each widget validates its own keys.
/// A JSON `null` reads as an empty bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WidgetConfig(Map<String, Value>);

impl<'de> Deserialize<'de> for WidgetConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self(map.unwrap_or_default()))
    }
}

impl WidgetConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object (`null` gives an empty bag). Anything else is rejected.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns `true` if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys set.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for WidgetConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A widget placed on the board.
///
/// Serialized as `{"id": …, "widgetType": …, "config": {…}}`; `config` is
/// omitted when empty and defaults to empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    /// Unique instance id.
    pub id: InstanceId,
    /// Registry type id.
    pub widget_type: String,
    /// Instance-specific settings.
    #[serde(default, skip_serializing_if = "WidgetConfig::is_empty")]
    pub config: WidgetConfig,
}

impl WidgetInstance {
    /// Creates an instance of `widget_type` with a freshly generated id.
    pub fn new(widget_type: impl Into<String>) -> Self {
        let widget_type = widget_type.into();
        Self {
            id: InstanceId::generate(&widget_type),
            widget_type,
            config: WidgetConfig::default(),
        }
    }

    /// Creates an instance with a caller-chosen id.
    pub fn with_id(id: InstanceId, widget_type: impl Into<String>) -> Self {
        Self {
            id,
            widget_type: widget_type.into(),
            config: WidgetConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }
}
