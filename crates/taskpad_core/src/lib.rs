//! Core domain logic for taskpad.
//! This crate is the single source of truth for task-list state transitions.

pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError, StorageResult};
pub use store::{SimpleTaskStore, StoreError, StoreResult, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
