use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use super::memory::MemoryStore;
use super::store::KeyValueStore;

/// File-backed store (native only).
///
/// Keeps entries in memory and rewrites the whole TXKV snapshot after
/// every mutation, so the file always reflects the last completed write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let bytes = std::fs::read(&path)?;
            MemoryStore::from_bytes(&bytes)?
        } else {
            MemoryStore::new()
        };
        tracing::debug!(path = %path.display(), entries = inner.len(), "opened file store");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), CoreError> {
        let bytes = self.inner.to_bytes()?;
        // Write-then-rename: the snapshot on disk is never half-written.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError> {
        self.inner.set(key, value)?;
        self.flush()
    }

    fn delete(&mut self, key: &str) -> Result<(), CoreError> {
        if !self.inner.contains_key(key) {
            return Ok(());
        }
        self.inner.delete(key)?;
        self.flush()
    }

    fn keys(&self) -> Result<Vec<String>, CoreError> {
        self.inner.keys()
    }
}
