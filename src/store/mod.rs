//! Widget instance store.
//!
//! [`WidgetStore`] owns the list of placed widgets and their responsive
//! layout, keeps both consistent with the [`WidgetRegistry`], and writes
//! them through a [`Storage`] backend after every change.
//!
//! The store is an explicit object: the application builds it with
//! [`WidgetStore::open`], passes it to whatever needs it, and drops it when
//! done. All operations are synchronous and take `&mut self`; there is a
//! single writer.
//!
//! # Persistence
//!
//! Two independent blobs are kept under the keys in [`StoreOptions`]:
//! the instance list (`{"widgets": [...]}`) and the layout map
//! (`{"lg": [...], "md": [...], ...}`). Mutations persist immediately and
//! do not report storage failures; those are logged at `warn`. Callers that
//! need to know whether state reached storage call [`WidgetStore::flush`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use widget_board::layout::Breakpoint;
//! use widget_board::registry::WidgetRegistry;
//! use widget_board::storage::MemoryStorage;
//! use widget_board::store::{StoreOptions, WidgetStore};
//!
//! let options = StoreOptions {
//!     default_widgets: vec![],
//!     ..StoreOptions::default()
//! };
//! let mut store = WidgetStore::open(
//!     Arc::new(WidgetRegistry::builtin()),
//!     MemoryStorage::new(),
//!     options,
//! );
//! let chat = store.add_instance("AgentChatWidget", None);
//! let notes = store.add_instance("PromptLibraryWidget", None);
//!
//! let lg = store.get_layout(Breakpoint::Lg);
//! assert_eq!((lg[0].y, lg[1].y), (0, 9));
//!
//! let removed = store.remove_instance(chat.id.as_str()).expect("present");
//! store.re_add_instance(removed);
//! assert_eq!(store.list_instances().len(), 2);
//! # let _ = notes;
//! ```

mod hydrate;

pub use hydrate::{hydrate, PersistedInstances};

use std::sync::Arc;

use crate::config::schema::Config;
use crate::instance::{WidgetConfig, WidgetInstance};
use crate::layout::{self, Breakpoint, LayoutEntry, Layouts, ReconcileReport};
use crate::registry::WidgetRegistry;
use crate::storage::{Storage, StorageError};

/// Storage keys and the default widget set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Key of the instance list blob.
    pub instances_key: String,
    /// Key of the layout map blob.
    pub layouts_key: String,
    /// Widget types placed on a fresh board and after a reset.
    pub default_widgets: Vec<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            instances_key: config.storage.instances_key.clone(),
            layouts_key: config.storage.layouts_key.clone(),
            default_widgets: config.dashboard.default_widgets.clone(),
        }
    }
}

/// Proof that the user confirmed a destructive reset.
///
/// [`WidgetStore::reset_to_defaults`] takes one by value so the call site
/// has to spell out that confirmation happened.
#[derive(Debug)]
pub struct ResetConfirmation(());

impl ResetConfirmation {
    /// The user confirmed the reset.
    pub fn confirmed() -> Self {
        Self(())
    }
}

/// Placed widgets plus their breakpoint layouts, persisted through `S`.
pub struct WidgetStore<S: Storage> {
    registry: Arc<WidgetRegistry>,
    storage: S,
    options: StoreOptions,
    instances: Vec<WidgetInstance>,
    layouts: Layouts,
}

impl<S: Storage> std::fmt::Debug for WidgetStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetStore")
            .field("options", &self.options)
            .field("instances", &self.instances)
            .field("layouts", &self.layouts)
            .finish()
    }
}

impl<S: Storage> WidgetStore<S> {
    /// Loads persisted state, validates it and reconciles layouts.
    ///
    /// Never fails. Missing or unreadable instance data starts a board with
    /// the default widgets; unreadable layout data starts from an empty map.
    /// Instances of unregistered types are dropped.
    pub fn open(registry: Arc<WidgetRegistry>, storage: S, options: StoreOptions) -> Self {
        let (instances, instances_dirty) = load_instances(&registry, &storage, &options);
        let layouts = load_layouts(&storage, &options.layouts_key);

        let mut store = Self {
            registry,
            storage,
            options,
            instances,
            layouts,
        };

        if instances_dirty {
            store.persist_instances();
        }
        store.reconcile();
        tracing::debug!(
            "Opened widget store with {} instances",
            store.instances.len()
        );
        store
    }

    /// Registry the store validates against.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Storage keys and default set in use.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Backend the store writes through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -----------------------------------------------------------------------
    // Instances
    // -----------------------------------------------------------------------

    /// Placed widgets in board order.
    pub fn list_instances(&self) -> &[WidgetInstance] {
        &self.instances
    }

    /// Looks up a placed widget by id.
    pub fn get_instance(&self, id: &str) -> Option<&WidgetInstance> {
        self.instances.iter().find(|w| w.id == id)
    }

    /// Places a new widget of `widget_type` at the end of the board.
    ///
    /// The type is not checked against the registry here; an unknown type
    /// gets a fallback-sized layout now and is dropped on the next load.
    pub fn add_instance(
        &mut self,
        widget_type: &str,
        initial_config: Option<WidgetConfig>,
    ) -> WidgetInstance {
        let instance = WidgetInstance::new(widget_type).with_config(initial_config.unwrap_or_default());
        tracing::info!("Adding widget {}", instance.id);
        self.instances.push(instance.clone());
        self.instances_changed();
        instance
    }

    /// Removes a widget, returning it so the caller can offer undo.
    ///
    /// Returns `None` and changes nothing if no widget has this id.
    pub fn remove_instance(&mut self, id: &str) -> Option<WidgetInstance> {
        let index = self.instances.iter().position(|w| w.id == id)?;
        let removed = self.instances.remove(index);
        tracing::info!("Removed widget {}", removed.id);
        self.instances_changed();
        Some(removed)
    }

    /// Puts back a previously removed widget verbatim.
    ///
    /// No uniqueness check is made; re-adding an id that is already present
    /// is the caller's mistake.
    pub fn re_add_instance(&mut self, instance: WidgetInstance) {
        tracing::info!("Re-adding widget {}", instance.id);
        self.instances.push(instance);
        self.instances_changed();
    }

    /// Replaces a widget's configuration.
    ///
    /// Returns `false` and changes nothing if no widget has this id.
    pub fn update_config(&mut self, id: &str, config: WidgetConfig) -> bool {
        let Some(instance) = self.instances.iter_mut().find(|w| w.id == id) else {
            tracing::debug!("update_config: no widget {}", id);
            return false;
        };
        instance.config = config;
        self.persist_instances();
        true
    }

    /// Replaces the whole board with the default widget set.
    ///
    /// Layout state is cleared and its persisted key removed; the defaults
    /// receive positions on the next [`reconcile`](Self::reconcile) or load.
    pub fn reset_to_defaults(&mut self, _confirmation: ResetConfirmation) {
        self.instances = default_instances(&self.options);
        self.layouts.clear();
        tracing::info!(
            "Reset board to {} default widgets",
            self.instances.len()
        );
        self.persist_instances();
        if let Err(e) = self.storage.remove(&self.options.layouts_key) {
            tracing::warn!("Failed to clear persisted layouts: {}", e);
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Entries at `breakpoint`.
    pub fn get_layout(&self, breakpoint: Breakpoint) -> &[LayoutEntry] {
        self.layouts.get(breakpoint)
    }

    /// The whole breakpoint map.
    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    /// Accepts a user-edited layout for one breakpoint as-is and persists it.
    ///
    /// Entries are not clamped or validated; the grid UI owns resize limits.
    pub fn set_layout(&mut self, breakpoint: Breakpoint, entries: Vec<LayoutEntry>) {
        self.layouts.set(breakpoint, entries);
        self.persist_layouts();
    }

    /// Accepts a user-edited layout map as-is and persists it.
    pub fn set_layouts(&mut self, layouts: Layouts) {
        self.layouts = layouts;
        self.persist_layouts();
    }

    /// Gives every widget a position at every breakpoint and prunes orphans.
    ///
    /// Persists the layout map if anything changed.
    pub fn reconcile(&mut self) -> ReconcileReport {
        let report = layout::reconcile(&self.registry, &self.instances, &mut self.layouts);
        if report.changed() {
            self.persist_layouts();
        }
        report
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Writes both blobs and reports the outcome.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.save_instances()?;
        self.save_layouts()
    }

    fn instances_changed(&mut self) {
        self.persist_instances();
        self.reconcile();
    }

    fn persist_instances(&mut self) {
        if let Err(e) = self.save_instances() {
            tracing::warn!("Failed to persist widgets: {}", e);
        }
    }

    fn persist_layouts(&mut self) {
        if let Err(e) = self.save_layouts() {
            tracing::warn!("Failed to persist layouts: {}", e);
        }
    }

    fn save_instances(&mut self) -> Result<(), StorageError> {
        let key = &self.options.instances_key;
        let json = serde_json::to_string(&PersistedInstancesRef {
            widgets: &self.instances,
        })
        .map_err(|source| StorageError::Encode {
            key: key.clone(),
            source,
        })?;
        self.storage.write(key, &json)
    }

    fn save_layouts(&mut self) -> Result<(), StorageError> {
        let key = &self.options.layouts_key;
        let json = self.layouts.to_json().map_err(|source| StorageError::Encode {
            key: key.clone(),
            source,
        })?;
        self.storage.write(key, &json)
    }
}

/// Borrowed twin of [`PersistedInstances`] used when writing.
#[derive(serde::Serialize)]
struct PersistedInstancesRef<'a> {
    widgets: &'a [WidgetInstance],
}

fn default_instances(options: &StoreOptions) -> Vec<WidgetInstance> {
    options
        .default_widgets
        .iter()
        .map(WidgetInstance::new)
        .collect()
}

/// Returns the hydrated list and whether it differs from what was stored.
fn load_instances<S: Storage>(
    registry: &WidgetRegistry,
    storage: &S,
    options: &StoreOptions,
) -> (Vec<WidgetInstance>, bool) {
    let text = match storage.read(&options.instances_key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::info!("No saved widgets, starting with defaults");
            return (default_instances(options), true);
        }
        Err(e) => {
            tracing::warn!("Could not read saved widgets, starting with defaults: {}", e);
            return (default_instances(options), true);
        }
    };

    match PersistedInstances::parse(&text) {
        Ok((persisted, skipped)) => {
            let parsed = persisted.widgets.len();
            let instances = hydrate(registry, persisted);
            let dropped = parsed - instances.len();
            (instances, skipped > 0 || dropped > 0)
        }
        Err(e) => {
            tracing::warn!("Could not parse saved widgets, starting with defaults: {}", e);
            (default_instances(options), true)
        }
    }
}

fn load_layouts<S: Storage>(storage: &S, key: &str) -> Layouts {
    match storage.read(key) {
        Ok(Some(text)) => Layouts::from_json(&text).unwrap_or_else(|e| {
            tracing::warn!("Could not parse saved layouts, starting empty: {}", e);
            Layouts::new()
        }),
        Ok(None) => Layouts::new(),
        Err(e) => {
            tracing::warn!("Could not read saved layouts, starting empty: {}", e);
            Layouts::new()
        }
    }
}

#[cfg(test)]
mod tests;
