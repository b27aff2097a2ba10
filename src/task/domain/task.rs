//! Task aggregate root and its insert-side counterpart.

use super::{TaskId, TaskTitle};
use crate::category::domain::CategoryId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    completed: bool,
    step: i32,
    created_at: DateTime<Utc>,
    category_id: Option<CategoryId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted step value.
    pub step: i32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted category reference, if any.
    pub category_id: Option<CategoryId>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            completed: data.completed,
            step: data.step,
            created_at: data.created_at,
            category_id: data.category_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the step value used as a secondary classification.
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the category reference, or `None` when uncategorized.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle) {
        self.title = title;
    }

    /// Sets the completion flag.
    pub const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Sets the step value.
    pub const fn set_step(&mut self, step: i32) {
        self.step = step;
    }
}

/// A task that has not been stored yet.
///
/// Storage assigns the identifier on insert; the creation timestamp is fixed
/// here and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    step: i32,
    created_at: DateTime<Utc>,
    category_id: Option<CategoryId>,
}

impl NewTask {
    /// Creates an incomplete, uncategorized task at step 0.
    #[must_use]
    pub fn new(title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            title,
            step: 0,
            created_at: clock.utc(),
            category_id: None,
        }
    }

    /// Sets the step value.
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = step;
        self
    }

    /// Links the task to a category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the step value.
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the category reference, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Binds a storage-assigned identifier, producing the stored task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            completed: false,
            step: self.step,
            created_at: self.created_at,
            category_id: self.category_id,
        })
    }
}
