//! Task types shared between the store and the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority. `Medium` is the form default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A single task.
///
/// Field names are kept in the persisted snapshot's camelCase wire shape.
/// `id` and `created_at` are set once at creation and never mutated; the
/// only field that changes afterwards is `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub is_outdoor: bool,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task. The store fills in id, timestamp and the
/// initial `completed = false`.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub is_outdoor: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn outdoor(mut self, is_outdoor: bool) -> Self {
        self.is_outdoor = is_outdoor;
        self
    }
}
