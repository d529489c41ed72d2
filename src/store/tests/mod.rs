//! Tests for the WidgetStore module.
//!
//! Tests are organized into categories:
//! - `hydrate`: loading, validation against the registry, fallbacks
//! - `lifecycle`: add / remove / re-add / update_config
//! - `layout`: reconciliation through the store and verbatim layout edits
//! - `reset`: reset_to_defaults
//! - `persistence`: what reaches storage and what happens when it fails

mod persistence;

use super::{StoreOptions, WidgetStore};
use crate::registry::WidgetRegistry;
use crate::storage::MemoryStorage;
use std::sync::Arc;

pub(super) const WIDGETS_KEY: &str = "widgetboard_widgets";
pub(super) const LAYOUTS_KEY: &str = "widgetboard_layouts";

/// Options with no default widgets, so a fresh store starts empty.
pub(super) fn empty_options() -> StoreOptions {
    StoreOptions {
        instances_key: WIDGETS_KEY.to_string(),
        layouts_key: LAYOUTS_KEY.to_string(),
        default_widgets: Vec::new(),
    }
}

/// Opens a store over `storage` with the built-in registry and no defaults.
pub(super) fn open_with(storage: MemoryStorage) -> WidgetStore<MemoryStorage> {
    WidgetStore::open(
        Arc::new(WidgetRegistry::builtin()),
        storage,
        empty_options(),
    )
}

/// Opens an empty store.
pub(super) fn empty_store() -> WidgetStore<MemoryStorage> {
    open_with(MemoryStorage::new())
}
