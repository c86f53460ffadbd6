//! Domain model for task-list records.
//!
//! # Responsibility
//! - Define the canonical data structures shared by the stores.
//!
//! # Invariants
//! - Rich-todo records carry a stable `TaskId` assigned once at creation.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

pub mod task;
