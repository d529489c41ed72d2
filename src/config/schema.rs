//! TOML configuration schema types for widget-board.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial file only overrides what it mentions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [dashboard]
/// [storage]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Board contents.
    pub dashboard: DashboardConfig,
    /// Where board state is persisted.
    pub storage: StorageConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Board contents configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Widget types placed on a fresh board and after a reset, in order.
    pub default_widgets: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_widgets: vec![
                "AgentChatWidget".to_string(),
                "PromptLibraryWidget".to_string(),
                "SystemMonitorWidget".to_string(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for state files. Empty string means the platform data dir.
    /// Tilde (`~`) is expanded.
    pub data_dir: String,
    /// Key of the instance list blob.
    pub instances_key: String,
    /// Key of the layout map blob.
    pub layouts_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            instances_key: "widgetboard_widgets".to_string(),
            layouts_key: "widgetboard_layouts".to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolved state directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(&self.data_dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration from the `[logging]` section.
///
/// The `WB_LOG` environment variable takes precedence over `level`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging verbosity.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[dashboard]
default_widgets = ["StatusWidget"]

[storage]
data_dir = "/var/lib/wb"
instances_key = "board_widgets"
layouts_key = "board_layouts"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.dashboard.default_widgets, vec!["StatusWidget"]);
        assert_eq!(config.storage.data_dir, "/var/lib/wb");
        assert_eq!(config.storage.instances_key, "board_widgets");
        assert_eq!(config.storage.layouts_key, "board_layouts");
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[dashboard]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.dashboard, DashboardConfig::default());
    }

    #[test]
    fn empty_default_widgets_is_allowed() {
        let config: Config =
            toml::from_str("[dashboard]\ndefault_widgets = []\n").expect("should parse");
        assert!(config.dashboard.default_widgets.is_empty());
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn explicit_data_dir_expands_tilde() {
        let storage = StorageConfig {
            data_dir: "~/boards".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(storage.resolved_data_dir(), xdg::expand_tilde("~/boards"));
    }

    #[test]
    fn log_level_directives() {
        assert_eq!(LogLevel::default().as_directive(), "info");
        assert_eq!(LogLevel::Trace.as_directive(), "trace");
    }

    #[test]
    fn default_storage_keys_match_browser_keys() {
        let storage = StorageConfig::default();
        assert_eq!(storage.instances_key, "widgetboard_widgets");
        assert_eq!(storage.layouts_key, "widgetboard_layouts");
    }
}
