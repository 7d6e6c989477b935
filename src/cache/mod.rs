//! Persistent key-value storage for the last known location.
//!
//! The engine only needs three operations from its store: read a key, write a key,
//! and forget a key. Anything that can provide those atomically per key can back
//! the engine:
//!
//! - [`MemoryCache`]: an in-process map, used by tests and embedders that persist
//!   state themselves
//! - [`FileCache`]: a JSON file in the XDG state directory, written atomically
//!
//! Read failures are never fatal: the engine treats them exactly like a missing key.

pub mod entry;
pub mod file;
pub mod memory;

use std::sync::Arc;
use thiserror::Error;

pub use entry::{decode_fix, encode_fix};
pub use file::FileCache;
pub use memory::MemoryCache;


/// Errors reported by cache implementations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache store could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored value exists but cannot be trusted as a location fix.
    #[error("cached entry is unreadable: {0}")]
    Unreadable(String),

    #[error("cache lock is poisoned")]
    Lock,
}

/// A durable string key-value store.
///
/// `set` must be atomic for a single key: a concurrent reader sees either the
/// previous value or the new one, never a partial write. Concurrent writers
/// resolve as last-write-wins.
#[cfg_attr(test, mockall::automock)]
pub trait PersistentCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove the key. Removing an absent key succeeds.
    fn clear(&self, key: &str) -> Result<(), CacheError>;
}

impl<T: PersistentCache + ?Sized> PersistentCache for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<(), CacheError> {
        (**self).clear(key)
    }
}
