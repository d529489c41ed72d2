//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# widget-board configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/widget-board/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Widget types placed on a fresh board and after `wb reset --yes`, in order.
# Run `wb types` to list the available ids.
default_widgets = ["AgentChatWidget", "PromptLibraryWidget", "SystemMonitorWidget"]

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory for board state. Empty means $XDG_DATA_HOME/widget-board.
# Tilde (~) is expanded to the user's home directory.
data_dir = ""

# File names (without .json) of the instance list and layout map.
instances_key = "widgetboard_widgets"
layouts_key = "widgetboard_layouts"

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Options: "error", "warn", "info", "debug", "trace"
# The WB_LOG environment variable overrides this.
level = "info"
"#;

/// Writes the default config only if none exists.
///
/// Returns `true` if a file was created.
pub fn create_default_config_if_missing() -> Result<bool, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        return Ok(false);
    }

    xdg::ensure_config_dir().map_err(|source| ConfigError::WriteError {
        path: path.clone(),
        source,
    })?;
    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(true)
}

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    create_default_config_at(&xdg::config_path(), force)
}

/// [`create_default_config`] against an explicit path.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    Ok(path.to_path_buf())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }
    Ok(())
}
