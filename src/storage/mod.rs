//! Synchronous key-value persistence for the cart.
//!
//! DESIGN
//! ======
//! The cart only ever needs `get` and `set` on a single string key, the
//! same surface as browser `localStorage`. Keeping the trait that small lets
//! the store run against a JSON file ([`FileStore`]) or a process-local map
//! ([`MemoryStore`]) without the cart knowing which.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors produced by a [`PersistentStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for storage.
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },
}

/// String key-value store that survives process restarts.
pub trait PersistentStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
