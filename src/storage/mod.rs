//! Key-value persistence backends for the widget store.
//!
//! The store keeps two independent JSON blobs (instance list and layout
//! map) under fixed keys. [`Storage`] is the host capability it writes
//! them through; [`FileStorage`] is the on-disk backend used by the CLI and
//! [`MemoryStorage`] backs tests and embedders that persist elsewhere.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot be mapped to a file name.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading a stored value failed.
    #[error("Failed to read {key} from {path}")]
    Read {
        /// Key being read.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a value failed.
    #[error("Failed to write {key} to {path}")]
    Write {
        /// Key being written.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding a value to JSON failed.
    #[error("Failed to encode {key}")]
    Encode {
        /// Key whose value could not be encoded.
        key: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Removing a value failed.
    #[error("Failed to remove {key} at {path}")]
    Remove {
        /// Key being removed.
        key: String,
        /// Backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Synchronous key-value storage.
///
/// Mirrors the browser storage API the board was built against: string
/// values under string keys, with absence as a normal outcome.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Checks that `key` is safe to use as a file stem.
///
/// Allowed: ASCII alphanumerics, `-`, `_` and `.`, not starting with `.`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
