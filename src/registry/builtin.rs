//! Built-in widget catalogue.

use super::{GridSize, SizeBounds, WidgetCategory, WidgetRegistry, WidgetTypeDescriptor};

use WidgetCategory::*;

/// `(id, name, category, default w, default h, min_w, max_w, min_h, max_h)`
type Row = (
    &'static str,
    &'static str,
    WidgetCategory,
    u32,
    u32,
    Option<u32>,
    Option<u32>,
    Option<u32>,
    Option<u32>,
);

const BUILTIN: &[Row] = &[
    ("Phase1CFastTrackKanban", "Priority 3: Phase 1.C Kanban", ProjectManagement, 12, 12, Some(8), None, Some(8), None),
    ("AgentChatWidget", "Chat Agent", AiAgents, 6, 9, Some(4), None, Some(6), None),
    ("MCPEmailRAGWidget", "Email Svarsassistent", Communication, 8, 11, Some(6), None, Some(9), None),
    ("IntelligentNotesWidget", "Intelligent Notes", Productivity, 7, 12, Some(6), None, Some(10), None),
    ("CybersecurityOverwatchWidget", "Cybersecurity Overwatch", Cybersecurity, 7, 12, Some(6), None, Some(10), None),
    ("ProcurementIntelligenceWidget", "Procurement Intelligence", Business, 8, 12, Some(6), None, Some(10), None),
    ("LiveConversationWidget", "Live Samtale", Communication, 6, 9, Some(4), None, Some(6), None),
    ("ImageAnalyzerWidget", "Billedanalyse", MediaAnalysis, 6, 10, Some(4), None, Some(8), None),
    ("AudioTranscriberWidget", "Lydtransskription", MediaAnalysis, 6, 8, Some(4), None, Some(6), None),
    ("VideoAnalyzerWidget", "Videoanalyse", MediaAnalysis, 7, 11, Some(5), None, Some(9), None),
    ("MCPConnectorWidget", "MCP Connector", System, 8, 11, Some(6), None, Some(8), None),
    ("PromptLibraryWidget", "Prompt Bibliotek", AiAgents, 6, 9, Some(4), None, None, None),
    ("PerformanceMonitorWidget", "Performance Monitor", System, 12, 6, Some(6), None, None, Some(6)),
    ("SystemMonitorWidget", "System Monitor", System, 8, 12, Some(6), None, Some(10), None),
    ("SystemSettingsWidget", "Systemindstillinger", System, 5, 7, None, Some(5), None, Some(7)),
    ("AgentBuilderWidget", "Agent Builder", AiAgents, 7, 10, Some(6), None, Some(10), None),
    ("WidgetImporterWidget", "Widget Importer", System, 8, 10, Some(6), None, Some(8), None),
    ("FeedIngestionWidget", "🔄 Feed Ingestion", Cybersecurity, 8, 10, Some(6), None, Some(8), None),
    ("SearchInterfaceWidget", "🔍 Security Search", Cybersecurity, 8, 10, Some(6), None, Some(8), None),
    ("ActivityStreamWidget", "📡 Activity Stream", Cybersecurity, 8, 10, Some(6), None, Some(8), None),
    ("StatusWidget", "Status", System, 5, 7, Some(4), Some(6), Some(6), Some(8)),
];

pub(super) fn catalogue() -> WidgetRegistry {
    let mut builder = WidgetRegistry::builder();
    for &(id, name, category, w, h, min_w, max_w, min_h, max_h) in BUILTIN {
        let descriptor = WidgetTypeDescriptor::new(id, name, category, GridSize::new(w, h))
            .with_bounds(SizeBounds {
                min_width: min_w,
                max_width: max_w,
                min_height: min_h,
                max_height: max_h,
            });
        builder = match builder.register(descriptor) {
            Ok(next) => next,
            // Static table, covered by `every_builtin_row_registers`.
            Err(e) => panic!("invalid built-in widget definition: {e}"),
        };
    }
    builder.build()
}
