//! Rich-todo store (variant B): `{id, text, completed, deleted}` records.
//!
//! # Responsibility
//! - Own the todo collection with id-addressed mutation operations.
//! - Produce the deleted-first display order.
//!
//! # Invariants
//! - Ids are epoch-millisecond timestamps, strictly increasing within one
//!   store, assigned once and never reused.
//! - Soft delete flags a record in place; nothing is ever erased.
//! - Text is validated on its trimmed form but stored untrimmed, matching
//!   the product behavior this store models.
//! - `visible_order` is a stable partition: every tombstoned record
//!   precedes every live one, relative order otherwise preserved.

use super::{decode_or_empty, StoreError, StoreResult};
use crate::model::task::{Task, TaskId};
use crate::storage::Storage;
use log::{debug, info};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key for the todo collection.
pub const TODOS_KEY: &str = "todos";

struct EditState {
    id: TaskId,
    buffer: String,
}

/// Task-list store over rich todo records.
pub struct TodoStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
    edit: Option<EditState>,
    /// Highest id issued or loaded so far; guards same-millisecond adds.
    last_id: TaskId,
}

impl<S: Storage> TodoStore<S> {
    /// Constructs the store by reading the collection key once.
    ///
    /// # Contract
    /// - Absent or malformed blobs fall back to an empty collection.
    /// - Backend transport failures propagate unchanged.
    pub fn load(storage: S) -> StoreResult<Self> {
        let tasks: Vec<Task> = decode_or_empty(TODOS_KEY, storage.load(TODOS_KEY)?);
        let last_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        info!(
            "event=state_load module=store status=ok variant=todo tasks={}",
            tasks.len()
        );
        Ok(Self {
            storage,
            tasks,
            edit: None,
            last_id,
        })
    }

    /// Creates a new task from raw input text and prepends it, newest
    /// first.
    ///
    /// The emptiness check uses the trimmed text, but the stored text keeps
    /// surrounding whitespace.
    ///
    /// # Errors
    /// - `EmptyText` when the input trims to nothing; the collection is
    ///   unchanged.
    pub fn add(&mut self, text: &str) -> StoreResult<()> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }
        let id = self.next_id();
        self.tasks.insert(0, Task::new(id, text));
        self.persist()
    }

    /// Flips the completion flag on the task matching `id`.
    ///
    /// # Errors
    /// - `NotFound` when no task has that id.
    /// - `TaskDeleted` when the task is tombstoned; completion of deleted
    ///   tasks is frozen at the model level.
    pub fn toggle(&mut self, id: TaskId) -> StoreResult<()> {
        let task = self.find_mut(id)?;
        if task.deleted {
            return Err(StoreError::TaskDeleted(id));
        }
        task.toggle_completed();
        self.persist()
    }

    /// Sets the tombstone flag on the task matching `id`. Idempotent: a
    /// second call leaves state untouched and skips the mirror write.
    ///
    /// # Errors
    /// - `NotFound` when no task has that id.
    pub fn soft_delete(&mut self, id: TaskId) -> StoreResult<()> {
        let task = self.find_mut(id)?;
        if task.deleted {
            return Ok(());
        }
        task.soft_delete();
        self.persist()
    }

    /// Records `id` as the edit target and seeds the edit buffer with the
    /// task's current text.
    ///
    /// Starting a new edit implicitly abandons any pending one.
    ///
    /// # Errors
    /// - `NotFound` when no task has that id.
    pub fn start_edit(&mut self, id: TaskId) -> StoreResult<()> {
        let task = self.find_mut(id)?;
        let buffer = task.text.clone();
        self.edit = Some(EditState { id, buffer });
        Ok(())
    }

    /// Replaces the edit buffer with the presentation layer's current text.
    /// Does nothing when no edit is in progress.
    pub fn set_edit_text(&mut self, text: &str) {
        if let Some(edit) = &mut self.edit {
            edit.buffer = text.to_string();
        }
    }

    /// Commits the pending edit, overwriting the target task's text with
    /// the raw buffer (validated trimmed, stored untrimmed). The overwrite
    /// applies regardless of the task's tombstone state.
    ///
    /// Edit target and buffer are cleared whether or not the commit
    /// succeeds.
    ///
    /// # Errors
    /// - `NoActiveEdit` when nothing is being edited.
    /// - `EmptyText` when the buffer trims to nothing.
    /// - `NotFound` when the target task no longer exists.
    pub fn save_edit(&mut self) -> StoreResult<()> {
        let edit = self.edit.take().ok_or(StoreError::NoActiveEdit)?;
        if edit.buffer.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }
        let task = self.find_mut(edit.id)?;
        task.text = edit.buffer;
        self.persist()
    }

    /// Clears edit target and buffer without mutating any task. Never
    /// fails.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Display sequence: a stable partition with every tombstoned record
    /// before every live one.
    ///
    /// Two filtered passes rather than a comparator sort, so relative order
    /// within each class is preserved by construction. Read-only.
    pub fn visible_order(&self) -> Vec<&Task> {
        let mut ordered: Vec<&Task> = Vec::with_capacity(self.tasks.len());
        ordered.extend(self.tasks.iter().filter(|task| task.deleted));
        ordered.extend(self.tasks.iter().filter(|task| !task.deleted));
        ordered
    }

    /// Full collection in insertion order (newest first), tombstones
    /// included.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Id currently designated as the edit target, if any.
    pub fn editing_id(&self) -> Option<TaskId> {
        self.edit.as_ref().map(|edit| edit.id)
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

    fn find_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn next_id(&mut self) -> TaskId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as TaskId)
            .unwrap_or(0);
        // Two adds within one millisecond would collide on wall-clock time
        // alone; ids must stay unique and strictly increasing.
        let id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id = id;
        id
    }

    fn persist(&mut self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.tasks)?;
        self.storage.save(TODOS_KEY, &blob)?;
        debug!(
            "event=state_save module=store status=ok variant=todo tasks={}",
            self.tasks.len()
        );
        Ok(())
    }
}
