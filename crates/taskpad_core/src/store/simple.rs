//! Simple-list store (variant A): positional text tasks.
//!
//! # Responsibility
//! - Own the active and deleted task lists with positional identity.
//! - Provide add/delete and the two-phase edit flow.
//!
//! # Invariants
//! - Stored text is trimmed and never empty.
//! - Deleting moves a task to the deleted list, most-recently-deleted
//!   first; deleted tasks are immutable (no edit or restore path).
//! - Both collection keys are mirrored after every successful mutation.

use super::{decode_or_empty, StoreError, StoreResult};
use crate::storage::Storage;
use log::{debug, info};

/// Storage key for the active list.
pub const TASKS_KEY: &str = "tasks";
/// Storage key for the deleted list.
pub const DELETED_TASKS_KEY: &str = "deletedTasks";

struct EditState {
    index: usize,
    buffer: String,
}

/// Task-list store over plain strings with positional identity.
pub struct SimpleTaskStore<S: Storage> {
    storage: S,
    active: Vec<String>,
    deleted: Vec<String>,
    edit: Option<EditState>,
}

impl<S: Storage> SimpleTaskStore<S> {
    /// Constructs the store by reading both collection keys once.
    ///
    /// # Contract
    /// - Absent or malformed blobs fall back to empty lists.
    /// - Backend transport failures propagate unchanged.
    pub fn load(storage: S) -> StoreResult<Self> {
        let active = decode_or_empty(TASKS_KEY, storage.load(TASKS_KEY)?);
        let deleted = decode_or_empty(DELETED_TASKS_KEY, storage.load(DELETED_TASKS_KEY)?);
        info!(
            "event=state_load module=store status=ok variant=simple active={} deleted={}",
            active.len(),
            deleted.len()
        );
        Ok(Self {
            storage,
            active,
            deleted,
            edit: None,
        })
    }

    /// Appends a new task with trimmed text to the end of the active list.
    ///
    /// # Errors
    /// - `EmptyText` when the input trims to nothing; the list is unchanged.
    pub fn add(&mut self, text: &str) -> StoreResult<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyText);
        }
        self.active.push(trimmed.to_string());
        self.persist()
    }

    /// Moves the task at `index` from the active list to the front of the
    /// deleted list.
    ///
    /// # Errors
    /// - `OutOfRange` when `index` does not address an active task.
    pub fn delete(&mut self, index: usize) -> StoreResult<()> {
        if index >= self.active.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: self.active.len(),
            });
        }

        let removed = self.active.remove(index);
        self.deleted.insert(0, removed);

        // Positional identity: a pending edit must follow the task it
        // targets, or be abandoned when that task is the one deleted.
        if let Some(edit) = self.edit.take() {
            if edit.index < index {
                self.edit = Some(edit);
            } else if edit.index > index {
                self.edit = Some(EditState {
                    index: edit.index - 1,
                    buffer: edit.buffer,
                });
            }
        }

        self.persist()
    }

    /// Designates the task at `index` as being edited and seeds the edit
    /// buffer with its current text.
    ///
    /// Starting a new edit implicitly abandons any pending one; the buffer
    /// is simply overwritten.
    pub fn start_edit(&mut self, index: usize) -> StoreResult<()> {
        let Some(text) = self.active.get(index) else {
            return Err(StoreError::OutOfRange {
                index,
                len: self.active.len(),
            });
        };
        self.edit = Some(EditState {
            index,
            buffer: text.clone(),
        });
        Ok(())
    }

    /// Replaces the edit buffer with the presentation layer's current text.
    /// Does nothing when no edit is in progress.
    pub fn set_edit_text(&mut self, text: &str) {
        if let Some(edit) = &mut self.edit {
            edit.buffer = text.to_string();
        }
    }

    /// Commits the pending edit, overwriting the target task with the
    /// trimmed buffer.
    ///
    /// The edit designation is cleared whether or not the commit succeeds.
    ///
    /// # Errors
    /// - `NoActiveEdit` when nothing is being edited.
    /// - `EmptyText` when the buffer trims to nothing; the task keeps its
    ///   previous text.
    pub fn save_edit(&mut self) -> StoreResult<()> {
        let edit = self.edit.take().ok_or(StoreError::NoActiveEdit)?;
        let trimmed = edit.buffer.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let Some(slot) = self.active.get_mut(edit.index) else {
            return Err(StoreError::OutOfRange {
                index: edit.index,
                len: self.active.len(),
            });
        };
        *slot = trimmed.to_string();
        self.persist()
    }

    /// Active tasks in insertion order.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Deleted tasks, most recently deleted first.
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    /// Index currently designated as being edited, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.edit.as_ref().map(|edit| edit.index)
    }

    /// Current edit buffer contents, if an edit is in progress.
    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(|edit| edit.buffer.as_str())
    }

    /// Releases the underlying backend, e.g. to reload a fresh store over
    /// the same persisted state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> StoreResult<()> {
        let active_blob = serde_json::to_string(&self.active)?;
        let deleted_blob = serde_json::to_string(&self.deleted)?;
        self.storage.save(TASKS_KEY, &active_blob)?;
        self.storage.save(DELETED_TASKS_KEY, &deleted_blob)?;
        debug!(
            "event=state_save module=store status=ok variant=simple active={} deleted={}",
            self.active.len(),
            self.deleted.len()
        );
        Ok(())
    }
}
