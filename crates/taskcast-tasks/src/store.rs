//! Insertion-ordered task store mirrored to persistent storage.
//!
//! Every successful mutation goes through one `persist` hook so that the
//! "mutation has a corresponding persisted write" invariant is enforced in
//! a single place.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use taskcast_storage::{Mirror, MirrorExt, StorageError};

use crate::types::{Task, TaskDraft};

/// Storage key for the task collection snapshot.
pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ordered collection of tasks. Insertion order is display order; there is
/// no reordering or editing, only add/toggle/delete.
pub struct TaskStore {
    tasks: Vec<Task>,
    mirror: Arc<dyn Mirror>,
}

impl TaskStore {
    /// Create an empty store. Call [`TaskStore::rehydrate`] before first use
    /// to pick up the persisted snapshot.
    pub fn new(mirror: Arc<dyn Mirror>) -> Self {
        Self {
            tasks: Vec::new(),
            mirror,
        }
    }

    /// The current collection, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Incomplete tasks flagged as outdoor, for weather annotation.
    pub fn outdoor_pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_outdoor && !t.completed)
    }

    /// Append a new task built from `draft` and persist the snapshot.
    ///
    /// The title is trimmed and must be non-empty; ids are fresh uuid-v4
    /// values, assumed collision-free.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task, TaskError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let task = Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: draft.description,
            priority: draft.priority,
            is_outdoor: draft.is_outdoor,
            completed: false,
            created_at: Utc::now(),
        };

        tracing::debug!("Adding task {} ({:?})", task.id, task.title);
        self.tasks.push(task);
        self.persist()?;

        // Just pushed, so the collection is non-empty.
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Remove the first task with `id`. A miss is a no-op, not an error.
    ///
    /// Returns whether a task was removed.
    pub fn delete_task(&mut self, id: Uuid) -> Result<bool, TaskError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            tracing::debug!("delete_task: no task with id {}", id);
            return Ok(false);
        };

        self.tasks.remove(pos);
        tracing::debug!("Deleted task {}", id);
        self.persist()?;
        Ok(true)
    }

    /// Flip `completed` on the first task with `id`. A miss is a no-op.
    ///
    /// Returns whether a task was toggled.
    pub fn toggle_task(&mut self, id: Uuid) -> Result<bool, TaskError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!("toggle_task: no task with id {}", id);
            return Ok(false);
        };

        task.completed = !task.completed;
        tracing::debug!("Toggled task {} -> completed={}", id, task.completed);
        self.persist()?;
        Ok(true)
    }

    /// Replace the in-memory collection with the persisted snapshot.
    ///
    /// A missing or malformed snapshot resets to an empty collection; the
    /// parse failure is logged at the mirror boundary and never propagated.
    pub fn rehydrate(&mut self) {
        self.tasks = self.mirror.load(TASKS_KEY).unwrap_or_default();
        tracing::debug!("Rehydrated {} task(s)", self.tasks.len());
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.mirror.save(TASKS_KEY, &self.tasks)
    }
}
