//! Widget type descriptor and its geometry types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::renderer::{PlaceholderRenderer, WidgetRenderer};

/// Width and height in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Columns spanned.
    pub width: u32,
    /// Rows spanned.
    pub height: u32,
}

impl GridSize {
    /// Creates a size of `width` columns by `height` rows.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Optional resize limits for a widget type, in grid units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    /// Narrowest allowed width.
    pub min_width: Option<u32>,
    /// Widest allowed width.
    pub max_width: Option<u32>,
    /// Shortest allowed height.
    pub min_height: Option<u32>,
    /// Tallest allowed height.
    pub max_height: Option<u32>,
}

/// Grouping tag used to organize the widget picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetCategory {
    /// Threat feeds, search and overwatch panels.
    Cybersecurity,
    /// Chat agents and agent tooling.
    AiAgents,
    /// Image, audio and video analysis.
    MediaAnalysis,
    /// Notes and personal productivity.
    Productivity,
    /// Developer tooling.
    Development,
    /// Business intelligence.
    Business,
    /// Email and conversation panels.
    Communication,
    /// Monitoring, settings and connectors.
    System,
    /// Kanban and planning boards.
    ProjectManagement,
}

impl WidgetCategory {
    /// All categories in display order.
    pub const ALL: [WidgetCategory; 9] = [
        WidgetCategory::Cybersecurity,
        WidgetCategory::AiAgents,
        WidgetCategory::MediaAnalysis,
        WidgetCategory::Productivity,
        WidgetCategory::Development,
        WidgetCategory::Business,
        WidgetCategory::Communication,
        WidgetCategory::System,
        WidgetCategory::ProjectManagement,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetCategory::Cybersecurity => "cybersecurity",
            WidgetCategory::AiAgents => "ai-agents",
            WidgetCategory::MediaAnalysis => "media-analysis",
            WidgetCategory::Productivity => "productivity",
            WidgetCategory::Development => "development",
            WidgetCategory::Business => "business",
            WidgetCategory::Communication => "communication",
            WidgetCategory::System => "system",
            WidgetCategory::ProjectManagement => "project-management",
        }
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error type for parsing [`WidgetCategory`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid widget category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for WidgetCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        WidgetCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Registry entry describing one kind of widget.
#[derive(Clone)]
pub struct WidgetTypeDescriptor {
    /// Unique widget type identifier, e.g. `AgentChatWidget`.
    pub id: String,
    /// Human-readable label.
    pub display_name: String,
    /// Short description shown in the picker.
    pub description: Option<String>,
    /// Picker grouping.
    pub category: WidgetCategory,
    /// Size a freshly placed instance starts with.
    pub default_size: GridSize,
    /// Resize limits.
    pub size_bounds: SizeBounds,
    /// Draws instances of this type. Never inspected by the store.
    pub renderer: Arc<dyn WidgetRenderer>,
}

impl WidgetTypeDescriptor {
    /// Creates an unbounded descriptor rendered by [`PlaceholderRenderer`].
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        category: WidgetCategory,
        default_size: GridSize,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: None,
            category,
            default_size,
            size_bounds: SizeBounds::default(),
            renderer: Arc::new(PlaceholderRenderer),
        }
    }

    /// Sets the resize limits.
    pub fn with_bounds(mut self, bounds: SizeBounds) -> Self {
        self.size_bounds = bounds;
        self
    }

    /// Sets the picker description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn WidgetRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

impl fmt::Debug for WidgetTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTypeDescriptor")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("default_size", &self.default_size)
            .field("size_bounds", &self.size_bounds)
            .field("renderer", &self.renderer.name())
            .finish()
    }
}
