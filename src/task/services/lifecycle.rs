//! Service layer for task creation, lookup, update and removal.

use crate::category::domain::CategoryId;
use crate::task::{
    domain::{
        NewTask, SortKey, Task, TaskDomainError, TaskFilter, TaskId, TaskQuery, TaskSummary,
        TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    step: Option<i32>,
    category_id: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            step: None,
            category_id: None,
        }
    }

    /// Sets the initial step value.
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }

    /// Links the new task to a category.
    ///
    /// Zero and negative identifiers leave the task uncategorized.
    #[must_use]
    pub const fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Request payload for updating a task.
///
/// The title is always rewritten; the completion flag and step only change
/// when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: String,
    completed: Option<bool>,
    step: Option<i32>,
}

impl UpdateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: None,
            step: None,
        }
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the step value.
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The referenced category does not exist.
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and stores a new, incomplete task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is invalid,
    /// [`TaskLifecycleError::UnknownCategory`] when the linked category does
    /// not exist, or [`TaskLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            step,
            category_id,
        } = request;

        let mut new_task = NewTask::new(TaskTitle::new(title)?, &*self.clock);
        if let Some(value) = step {
            new_task = new_task.with_step(value);
        }
        if let Some(category) = CategoryId::from_nullable(category_id) {
            if !self.repository.category_exists(category).await? {
                return Err(TaskLifecycleError::UnknownCategory(category));
            }
            new_task = new_task.with_category(category);
        }

        let task = self.repository.store(&new_task).await?;
        debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every task in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<TaskSummary>> {
        let query = TaskQuery::new(TaskFilter::new(), SortKey::IdAscending);
        let listings = self.repository.search(&query).await?;
        Ok(listings
            .iter()
            .map(|listing| TaskSummary::from(&listing.task))
            .collect())
    }

    /// Loads a task, applies the requested changes and persists it.
    ///
    /// Returns `Ok(None)` when the task does not exist; absence is checked
    /// before the new title is validated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is invalid, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Option<Task>> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let UpdateTaskRequest {
            title,
            completed,
            step,
        } = request;

        task.rename(TaskTitle::new(title)?);
        if let Some(flag) = completed {
            task.set_completed(flag);
        }
        if let Some(value) = step {
            task.set_step(value);
        }

        match self.repository.update(&task).await {
            Ok(()) => {
                debug!(task_id = %id, "task updated");
                Ok(Some(task))
            }
            Err(TaskRepositoryError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes a task.
    ///
    /// Returns `Ok(false)` when the task did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn remove(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        let removed = self.repository.remove(id).await?;
        debug!(task_id = %id, removed, "task removal requested");
        Ok(removed)
    }
}
