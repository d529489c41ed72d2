//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG location.
//! When the default location has no file, returns `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;
use crate::registry::WidgetRegistry;
use crate::storage::validate_key;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse_toml(&content, path)
    }

    /// Load configuration from the default XDG location.
    ///
    /// If no file exists at the default path, returns `Config::default()`
    /// instead of an error.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Load from `explicit` if given (it must exist), else the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Self::load_default(),
        }
    }

    /// Check settings that serde cannot check on its own.
    ///
    /// Every entry of `dashboard.default_widgets` must name a registered type;
    /// otherwise a reset would place widgets that vanish on the next load.
    /// Both storage keys must be usable file stems and must differ, since the
    /// two blobs would otherwise overwrite each other.
    pub fn validate(config: &Config, registry: &WidgetRegistry) -> Result<(), ConfigError> {
        if let Some(unknown) = config
            .dashboard
            .default_widgets
            .iter()
            .find(|id| !registry.contains(id))
        {
            return Err(ConfigError::UnknownWidgetType(unknown.clone()));
        }

        let storage = &config.storage;
        for (field, key) in [
            ("instances_key", &storage.instances_key),
            ("layouts_key", &storage.layouts_key),
        ] {
            validate_key(key).map_err(|_| ConfigError::InvalidStorageKey {
                field,
                key: key.clone(),
            })?;
        }
        if storage.instances_key == storage.layouts_key {
            return Err(ConfigError::SharedStorageKey(storage.instances_key.clone()));
        }
        Ok(())
    }

    /// Parse a TOML string into `Config` with position-aware error reporting.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| line_column(content, span.start))
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// One-based line and column of byte `offset` in `content`.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    (line, before.len() - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;
    use serial_test::serial;
    use std::path::PathBuf;

    /// Run a closure with `XDG_CONFIG_HOME` temporarily set, then restore.
    fn with_xdg_config<F: FnOnce()>(value: Option<&str>, f: F) {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        match value {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        f();
        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    // -----------------------------------------------------------------------
    // parse_toml
    // -----------------------------------------------------------------------

    #[test]
    fn parse_partial_config_fills_defaults() {
        let path = PathBuf::from("partial.toml");
        let config = ConfigLoader::parse_toml("[logging]\nlevel = \"warn\"\n", &path)
            .expect("partial config should parse");
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.storage.instances_key, "widgetboard_widgets");
        assert_eq!(config.dashboard.default_widgets.len(), 3);
    }

    #[test]
    fn parse_invalid_toml_returns_parse_error_with_position() {
        let toml_str = "key = \ninvalid";
        let path = PathBuf::from("bad.toml");
        let err = ConfigLoader::parse_toml(toml_str, &path).expect_err("should fail");
        match err {
            ConfigError::ParseError {
                path: p,
                line,
                column,
                message,
            } => {
                assert_eq!(p, path);
                assert!(line > 0, "line should be > 0 for known span");
                assert!(column > 0, "column should be > 0 for known span");
                assert!(!message.is_empty(), "message should not be empty");
            }
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn parse_wrong_type_reports_line() {
        let toml_str = "[dashboard]\ndefault_widgets = 5\n";
        let err = ConfigLoader::parse_toml(toml_str, Path::new("typed.toml")).expect_err("should fail");
        match err {
            ConfigError::ParseError { line, .. } => assert_eq!(line, 2),
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // load_from_path / load_default
    // -----------------------------------------------------------------------

    #[test]
    fn load_from_path_valid_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = dir.path().join("config.toml");
        fs::write(&file, "[logging]\nlevel = \"trace\"\n").expect("failed to write temp file");
        let config = ConfigLoader::load_from_path(&file).expect("should load");
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn load_from_path_missing_file_returns_not_found() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("absent.toml");
        let err = ConfigLoader::load_from_path(&path).expect_err("should fail");
        match err {
            ConfigError::NotFound { path: p } => assert_eq!(p, path),
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn load_default_without_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        with_xdg_config(Some(dir.path().to_str().expect("utf8 path")), || {
            let config = ConfigLoader::load_default().expect("defaults");
            assert_eq!(config, Config::default());
        });
    }

    #[test]
    #[serial]
    fn load_default_reads_xdg_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let app_dir = dir.path().join("widget-board");
        fs::create_dir_all(&app_dir).expect("mkdir");
        fs::write(
            app_dir.join("config.toml"),
            "[dashboard]\ndefault_widgets = [\"StatusWidget\"]\n",
        )
        .expect("write config");
        with_xdg_config(Some(dir.path().to_str().expect("utf8 path")), || {
            let config = ConfigLoader::load_default().expect("should load");
            assert_eq!(config.dashboard.default_widgets, vec!["StatusWidget"]);
        });
    }

    #[test]
    fn load_with_explicit_missing_path_is_not_found() {
        let err = ConfigLoader::load(Some(Path::new("/nonexistent/wb.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn line_column_counts_from_one() {
        let text = "a = 1\nbb = x\n";
        assert_eq!(line_column(text, 0), (1, 1));
        assert_eq!(line_column(text, 6), (2, 1));
        assert_eq!(line_column(text, 11), (2, 6));
    }

    // -----------------------------------------------------------------------
    // validate
    // -----------------------------------------------------------------------

    #[test]
    fn validate_accepts_builtin_defaults() {
        let registry = WidgetRegistry::builtin();
        ConfigLoader::validate(&Config::default(), &registry).expect("defaults are valid");
    }

    #[test]
    fn validate_rejects_shared_storage_key() {
        let registry = WidgetRegistry::builtin();
        let mut config = Config::default();
        config.storage.instances_key = "board".to_string();
        config.storage.layouts_key = "board".to_string();
        match ConfigLoader::validate(&config, &registry) {
            Err(ConfigError::SharedStorageKey(key)) => assert_eq!(key, "board"),
            other => panic!("expected SharedStorageKey, got: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_key_unusable_as_file_name() {
        let registry = WidgetRegistry::builtin();
        let mut config = Config::default();
        config.storage.layouts_key = "my layouts".to_string();
        match ConfigLoader::validate(&config, &registry) {
            Err(ConfigError::InvalidStorageKey { field, key }) => {
                assert_eq!(field, "layouts_key");
                assert_eq!(key, "my layouts");
            }
            other => panic!("expected InvalidStorageKey, got: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unknown_default_widget() {
        let registry = WidgetRegistry::builtin();
        let mut config = Config::default();
        config.dashboard.default_widgets.push("DarkWebMonitor".to_string());
        match ConfigLoader::validate(&config, &registry) {
            Err(ConfigError::UnknownWidgetType(id)) => assert_eq!(id, "DarkWebMonitor"),
            other => panic!("expected UnknownWidgetType, got: {other:?}"),
        }
    }
}
