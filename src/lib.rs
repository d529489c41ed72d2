//! Widget Board library
//!
//! Core of a widget dashboard: the catalogue of widget types, the store of
//! placed widget instances, and the reconciler that keeps a responsive grid
//! layout in step with them.
//!
//! - [`registry`]: widget type descriptors and their renderers
//! - [`instance`]: placed widgets and their configuration
//! - [`layout`]: breakpoints, layout entries and reconciliation
//! - [`store`]: the persisted instance store
//! - [`storage`]: key-value backends the store writes through
//! - [`config`]: TOML configuration and XDG paths
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use widget_board::layout::Breakpoint;
//! use widget_board::registry::WidgetRegistry;
//! use widget_board::storage::MemoryStorage;
//! use widget_board::store::{ResetConfirmation, StoreOptions, WidgetStore};
//!
//! let mut store = WidgetStore::open(
//!     Arc::new(WidgetRegistry::builtin()),
//!     MemoryStorage::new(),
//!     StoreOptions::default(),
//! );
//! assert_eq!(store.list_instances().len(), 3);
//!
//! store.add_instance("StatusWidget", None);
//! assert_eq!(store.get_layout(Breakpoint::Xxs).len(), 4);
//!
//! store.reset_to_defaults(ResetConfirmation::confirmed());
//! assert!(store.layouts().is_empty());
//! ```

pub mod config;
pub mod instance;
pub mod layout;
pub mod logging;
pub mod registry;
pub mod storage;
pub mod store;

mod error;

pub use error::{Error, Result};
pub use instance::{InstanceId, WidgetConfig, WidgetInstance};
pub use layout::{Breakpoint, LayoutEntry, Layouts};
pub use registry::{WidgetRegistry, WidgetTypeDescriptor};
pub use store::{ResetConfirmation, StoreOptions, WidgetStore};
