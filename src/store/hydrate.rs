//! Loading persisted instances and validating them against the registry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::instance::WidgetInstance;
use crate::registry::WidgetRegistry;

/// Persisted form of the instance list: `{"widgets": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedInstances {
    /// Placed widgets, in board order.
    pub widgets: Vec<WidgetInstance>,
}

#[derive(Deserialize)]
struct RawInstances {
    #[serde(default)]
    widgets: Vec<Value>,
}

impl PersistedInstances {
    /// Parses the persisted JSON form.
    ///
    /// Malformed records are skipped individually with a warning; only a
    /// blob that is not an object at all is an error.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Self::parse(text).map(|(persisted, _)| persisted)
    }

    /// Like [`from_json`](Self::from_json), also returning how many records
    /// were skipped as malformed.
    pub(crate) fn parse(text: &str) -> Result<(Self, usize), serde_json::Error> {
        let raw: RawInstances = serde_json::from_str(text)?;
        let total = raw.widgets.len();
        let widgets: Vec<WidgetInstance> = raw
            .widgets
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<WidgetInstance>(item) {
                Ok(instance) => Some(instance),
                Err(e) => {
                    tracing::warn!("Skipping malformed widget record: {}", e);
                    None
                }
            })
            .collect();
        let skipped = total - widgets.len();
        Ok((Self { widgets }, skipped))
    }
}

/// Keeps only the instances whose type is registered, preserving order.
///
/// Instances of unknown types (for example a widget retired between
/// releases) are dropped and logged. This is the only place instances are
/// removed without an explicit user action.
pub fn hydrate(registry: &WidgetRegistry, persisted: PersistedInstances) -> Vec<WidgetInstance> {
    persisted
        .widgets
        .into_iter()
        .filter(|instance| {
            let known = registry.contains(&instance.widget_type);
            if !known {
                tracing::warn!(
                    "Dropping widget {} of unregistered type {}",
                    instance.id,
                    instance.widget_type
                );
            }
            known
        })
        .collect()
}
