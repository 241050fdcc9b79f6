//! The Persistence Layer port.
//!
//! A synchronous key-value store of strings. The cart keeps its JSON-encoded
//! entries under one key and rewrites it after every committed change.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors returned by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not encode value: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend refused the operation (full, read-only, switched off).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value storage with synchronous access.
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
