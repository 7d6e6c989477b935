//! File-backed cache in the XDG state directory.
//!
//! All keys live in one JSON object (`cache.json`). Writers serialize through an
//! exclusive lock on `cache.lock` and replace the store with an atomic rename, so
//! readers never need the lock: they always see a complete file.

use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::{CacheError, PersistentCache};
use crate::constants::{CACHE_FILE_NAME, CACHE_LOCK_FILE_NAME};

type Store = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileCache {
    /// Open (creating if needed) a cache stored in `dir`.
    pub fn open(dir: &Path) -> Result<Self, CacheError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            path: dir.join(CACHE_FILE_NAME),
            lock_path: dir.join(CACHE_LOCK_FILE_NAME),
        })
    }

    /// Open the cache for the active configuration directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let config_dir = crate::config::get_custom_config_dir();
        let dir = crate::state::get_state_dir(config_dir.as_deref())?;
        Ok(Self::open(&dir)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_store(&self) -> Result<Store, CacheError> {
        // Bytes, so a bad encoding surfaces as a parse error like any other corruption
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Store::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Store::new());
        }

        Ok(serde_json::from_slice(&content)?)
    }

    /// Read-modify-write under the writer lock.
    fn update(&self, apply: impl FnOnce(&mut Store)) -> Result<(), CacheError> {
        let lock_file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;
        lock_file.lock_exclusive()?;

        // A corrupt store is replaced rather than preserved
        let mut store = match self.read_store() {
            Ok(store) => store,
            Err(CacheError::Serialization(e)) => {
                log_warning!("Discarding corrupt cache file: {e}");
                Store::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut store);

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, &store)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| CacheError::Io(e.error))?;

        // Closing the lock file releases the lock
        drop(lock_file);
        Ok(())
    }
}

impl PersistentCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.read_store()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.update(|store| {
            store.insert(key.to_string(), value.to_string());
        })
    }

    fn clear(&self, key: &str) -> Result<(), CacheError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|store| {
            store.remove(key);
        })
    }
}
