//! Task-list stores and their shared error contract.
//!
//! # Responsibility
//! - Own the ordered task collections and their mutation operations.
//! - Mirror full state to the persistence port after every mutation.
//!
//! # Invariants
//! - Failed operations leave the collection unchanged and write nothing.
//! - Malformed persisted blobs degrade to an empty collection, never an
//!   error (matching absent-key behavior).

use crate::model::task::TaskId;
use crate::storage::StorageError;
use log::warn;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod simple;
pub mod todo;

pub use simple::SimpleTaskStore;
pub use todo::TodoStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error contract for store operations.
///
/// The original UI swallowed all of these as silent no-ops; they are
/// explicit here so the contract is testable. Every variant guarantees the
/// collection was left untouched.
#[derive(Debug)]
pub enum StoreError {
    /// Input text was empty or whitespace-only after trimming.
    EmptyText,
    /// No task with the given id exists.
    NotFound(TaskId),
    /// Positional precondition violation for index-addressed operations.
    OutOfRange { index: usize, len: usize },
    /// Toggle targeted a tombstoned task.
    TaskDeleted(TaskId),
    /// `save_edit` called with no edit in progress.
    NoActiveEdit,
    /// Collection could not be serialized for the persistence mirror.
    Encode(serde_json::Error),
    /// Persistence backend write failure.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text is empty after trimming"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::OutOfRange { index, len } => {
                write!(f, "task index {index} out of range for length {len}")
            }
            Self::TaskDeleted(id) => write!(f, "task is deleted: {id}"),
            Self::NoActiveEdit => write!(f, "no edit in progress"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Decodes one persisted collection blob, treating malformed content as
/// absent per the load contract.
fn decode_or_empty<T: DeserializeOwned>(key: &str, blob: Option<String>) -> Vec<T> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    match serde_json::from_str(&blob) {
        Ok(items) => items,
        Err(err) => {
            warn!("event=state_load module=store status=fallback key={key} error={err}");
            Vec::new()
        }
    }
}
