//! Persistence port and in-memory backend.
//!
//! # Responsibility
//! - Define the key-value contract the stores mirror their state through.
//! - Provide a session-lifetime in-memory backend.
//!
//! # Invariants
//! - Blobs are opaque UTF-8 text; backends never interpret them.
//! - `save` replaces the whole value for a key; there is no partial write.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport error for persistence backends.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence port injected into the stores.
///
/// # Contract
/// - `load` returns `None` for absent keys; it never invents a value.
/// - `save` durably replaces the value for `key` before returning.
pub trait Storage {
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Volatile in-memory backend with session lifetime.
///
/// State is lost when the value is dropped, mirroring tab-scoped browser
/// storage. Also the primary test double for store behavior.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, for constructing stores over existing state.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.into(), value.into());
        storage
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
