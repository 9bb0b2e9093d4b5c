//! File-backed key-value slots
//!
//! All slots live in one JSON object on disk. Writes go to a sibling temp
//! file which is then renamed over the original, so a crash never leaves a
//! half-written map behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use careerdeck_core::KeyValueStore;
use careerdeck_domain::{CareerDeckError, Result};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::InfraError;

#[derive(Debug, Error)]
enum FileStoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("storage path {0} has no parent directory")]
    NoParent(PathBuf),
}

impl From<FileStoreError> for CareerDeckError {
    fn from(value: FileStoreError) -> Self {
        CareerDeckError::Storage(value.to_string())
    }
}

/// Key-value slots persisted as one JSON map.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(FileStoreError::Read { path: self.path.clone(), source }.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "storage file is corrupt; treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
            Some(dir) => dir,
            None => return Err(FileStoreError::NoParent(self.path.clone()).into()),
        };
        fs::create_dir_all(dir).map_err(InfraError::from)?;

        let file_name = self.path.file_name().and_then(|name| name.to_str()).unwrap_or("store");
        let temp = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));
        let bytes = serde_json::to_vec_pretty(map).map_err(InfraError::from)?;

        let write = |temp: &Path| -> std::io::Result<()> {
            let mut file = fs::File::create(temp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(temp, &self.path)
        };

        if let Err(source) = write(&temp) {
            let _ = fs::remove_file(&temp);
            return Err(FileStoreError::Write { path: self.path.clone(), source }.into());
        }

        debug!(path = %self.path.display(), slots = map.len(), "storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}
