//! File-backed storage: one JSON file per key.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::xdg;

use super::{validate_key, Storage, StorageError};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a timestamped temp file that is fsynced and then renamed
/// over the target, so a crash mid-write leaves the previous value intact.
/// The directory is created (mode 0700) on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. Nothing is created until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write_err = |path: &Path, source: std::io::Error| StorageError::Write {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        };

        xdg::ensure_dir(&self.dir).map_err(|e| write_err(&self.dir, e))?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.f").to_string();
        let temp_path = self.dir.join(format!("{key}.json.tmp.{timestamp}"));

        let mut file = fs::File::create(&temp_path).map_err(|e| write_err(&temp_path, e))?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| write_err(&temp_path, e))?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(&path, e));
        }
        tracing::trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }
}
