//! Widget registry for the dashboard.
//!
//! The registry is the catalogue of widget *types*: which kinds of panel can
//! be placed on the board, how big they start, how far they may be resized,
//! and which renderer draws them. It is built once at startup and is
//! read-only afterwards.
//!
//! # Example
//!
//! ```
//! use widget_board::registry::{RegistryQuery, WidgetCategory, WidgetRegistry};
//!
//! let registry = WidgetRegistry::builtin();
//! let chat = registry.get_type("AgentChatWidget").expect("built-in type");
//! assert_eq!(chat.default_size.width, 6);
//! assert!(registry.get_type("RetiredWidget").is_none());
//!
//! let query = RegistryQuery::default().with_category(WidgetCategory::System);
//! assert!(registry.query(&query).iter().all(|d| d.category == WidgetCategory::System));
//! ```

mod builtin;
mod descriptor;
mod renderer;

pub use descriptor::{
    GridSize, ParseCategoryError, SizeBounds, WidgetCategory, WidgetTypeDescriptor,
};
pub use renderer::{PlaceholderRenderer, WidgetRenderer};

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building a registry catalogue.
///
/// A successfully built [`WidgetRegistry`] never produces these; they only
/// surface from [`RegistryBuilder::register`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Descriptor id is empty.
    #[error("Widget type id must not be empty")]
    EmptyId,

    /// A descriptor with the same id was already registered.
    #[error("Widget type already registered: {0}")]
    DuplicateId(String),

    /// Default size has a zero dimension.
    #[error("Widget type {id} has a zero-sized default ({width}x{height})")]
    ZeroSize {
        /// Offending widget type id.
        id: String,
        /// Default width.
        width: u32,
        /// Default height.
        height: u32,
    },

    /// A minimum bound exceeds its maximum.
    #[error("Widget type {id} has inverted {axis} bounds (min {min} > max {max})")]
    InvertedBounds {
        /// Offending widget type id.
        id: String,
        /// `"width"` or `"height"`.
        axis: &'static str,
        /// Minimum bound.
        min: u32,
        /// Maximum bound.
        max: u32,
    },

    /// Default size falls outside the declared bounds.
    #[error("Widget type {id} default {axis} {value} is outside its size bounds")]
    DefaultOutOfBounds {
        /// Offending widget type id.
        id: String,
        /// `"width"` or `"height"`.
        axis: &'static str,
        /// Default value on that axis.
        value: u32,
    },
}

/// Filter for [`WidgetRegistry::query`].
///
/// Empty filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryQuery {
    /// Exact category match.
    pub category: Option<WidgetCategory>,
    /// Case-insensitive substring match over id and display name.
    pub search: Option<String>,
}

impl RegistryQuery {
    /// Restricts the query to a single category.
    pub fn with_category(mut self, category: WidgetCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts the query to types whose id or name contains `text`.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    fn matches(&self, descriptor: &WidgetTypeDescriptor) -> bool {
        if let Some(category) = self.category {
            if descriptor.category != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !descriptor.id.to_lowercase().contains(&needle)
                && !descriptor.display_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Fixed catalogue of widget types.
///
/// Descriptors are kept in registration order; lookups go through an id
/// index.
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    types: Vec<WidgetTypeDescriptor>,
    index: HashMap<String, usize>,
}

impl WidgetRegistry {
    /// Starts an empty catalogue.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The catalogue shipped with the board.
    pub fn builtin() -> Self {
        builtin::catalogue()
    }

    /// All registered types, in registration order.
    pub fn list_types(&self) -> &[WidgetTypeDescriptor] {
        &self.types
    }

    /// Looks up a type by id.
    ///
    /// `None` is an expected outcome when persisted data references a type
    /// that no longer ships.
    pub fn get_type(&self, id: &str) -> Option<&WidgetTypeDescriptor> {
        self.index.get(id).map(|&i| &self.types[i])
    }

    /// Returns `true` if `id` names a registered type.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Types matching `query`, in registration order.
    pub fn query(&self, query: &RegistryQuery) -> Vec<&WidgetTypeDescriptor> {
        self.types.iter().filter(|d| query.matches(d)).collect()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the catalogue has no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Accumulates validated descriptors into a [`WidgetRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<WidgetTypeDescriptor>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Validates and adds a descriptor.
    ///
    /// Rejects empty or duplicate ids, zero-sized defaults, inverted bounds
    /// and defaults that fall outside the bounds.
    pub fn register(mut self, descriptor: WidgetTypeDescriptor) -> Result<Self, RegistryError> {
        validate(&descriptor)?;
        if self.index.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        self.index.insert(descriptor.id.clone(), self.types.len());
        self.types.push(descriptor);
        Ok(self)
    }

    /// Freezes the catalogue.
    pub fn build(self) -> WidgetRegistry {
        WidgetRegistry {
            types: self.types,
            index: self.index,
        }
    }
}

fn validate(descriptor: &WidgetTypeDescriptor) -> Result<(), RegistryError> {
    let id = &descriptor.id;
    if id.is_empty() {
        return Err(RegistryError::EmptyId);
    }
    let size = descriptor.default_size;
    if size.width == 0 || size.height == 0 {
        return Err(RegistryError::ZeroSize {
            id: id.clone(),
            width: size.width,
            height: size.height,
        });
    }
    let bounds = descriptor.size_bounds;
    check_axis(id, "width", size.width, bounds.min_width, bounds.max_width)?;
    check_axis(id, "height", size.height, bounds.min_height, bounds.max_height)
}

fn check_axis(
    id: &str,
    axis: &'static str,
    value: u32,
    min: Option<u32>,
    max: Option<u32>,
) -> Result<(), RegistryError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(RegistryError::InvertedBounds {
                id: id.to_string(),
                axis,
                min,
                max,
            });
        }
    }
    let below = min.is_some_and(|m| value < m);
    let above = max.is_some_and(|m| value > m);
    if below || above {
        return Err(RegistryError::DefaultOutOfBounds {
            id: id.to_string(),
            axis,
            value,
        });
    }
    Ok(())
}
