//! Renderer capability attached to widget types.
//!
//! Real widget components live outside this crate. The store treats a
//! renderer as a black box; only the CLI calls it, to print a one-line
//! preview of each placed widget.

use crate::instance::WidgetInstance;

use super::WidgetTypeDescriptor;

/// Draws a widget instance.
///
/// Renderers must be thread-safe (`Send + Sync`) so a registry can be
/// shared behind an `Arc`.
pub trait WidgetRenderer: Send + Sync {
    /// Render `instance` into at most `width` characters.
    fn render(
        &self,
        descriptor: &WidgetTypeDescriptor,
        instance: &WidgetInstance,
        width: usize,
    ) -> String;

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Renders `[<display name>] <instance id>`.
///
/// Stand-in for every built-in type; output is truncated to the available
/// width.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl WidgetRenderer for PlaceholderRenderer {
    fn render(
        &self,
        descriptor: &WidgetTypeDescriptor,
        instance: &WidgetInstance,
        width: usize,
    ) -> String {
        let full = format!("[{}] {}", descriptor.display_name, instance.id);
        full.chars().take(width).collect()
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
