//! Crate-level error type.
//!
//! Each module keeps its own error enum; [`Error`] wraps them so callers
//! that touch several modules (the `wb` binary) can use a single `?`.

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::layout::ParseBreakpointError;
use crate::registry::{ParseCategoryError, RegistryError};
use crate::storage::StorageError;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Registry catalogue error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Unrecognised breakpoint name
    #[error(transparent)]
    Breakpoint(#[from] ParseBreakpointError),

    /// Unrecognised widget category
    #[error(transparent)]
    Category(#[from] ParseCategoryError),

    /// Malformed JSON supplied by the caller
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that parsed but cannot be acted on
    #[error("{0}")]
    InvalidInput(String),
}

/// Result alias using the crate-level [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
