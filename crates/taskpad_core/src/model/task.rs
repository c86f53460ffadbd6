//! Task domain model.
//!
//! # Responsibility
//! - Define the rich-todo record persisted by [`crate::store::TodoStore`].
//! - Provide lifecycle helpers for completion and soft-delete semantics.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused or mutated.
//! - `deleted` is the source of truth for tombstone state; records are
//!   never erased.

use serde::{Deserialize, Serialize};

/// Stable identifier for a rich-todo task: creation time in Unix epoch
/// milliseconds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// One rich-todo record.
///
/// Wire shape is `{id, text, completed, deleted}`, matching the persisted
/// JSON blob format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in epoch milliseconds, unique within one store.
    pub id: TaskId,
    /// Raw task text as entered. Emptiness is validated on the trimmed
    /// value, but the stored text keeps surrounding whitespace.
    pub text: String,
    /// Completion flag toggled by the user.
    pub completed: bool,
    /// Soft delete tombstone; set once, never cleared.
    pub deleted: bool,
}

impl Task {
    /// Creates a fresh record with both flags cleared.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            deleted: false,
        }
    }

    /// Marks this task as softly deleted (tombstoned). Idempotent.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task is still live (not tombstoned).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}
