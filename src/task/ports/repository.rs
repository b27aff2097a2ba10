//! Repository port for task persistence and querying.

use crate::category::domain::CategoryId;
use crate::task::domain::{NewTask, Task, TaskFilter, TaskId, TaskListing, TaskQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Persists the mutable fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// Returns `false` when no task had the identifier.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns whether a task with the identifier exists.
    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns whether a category with the identifier exists.
    ///
    /// Used to validate the category link of new tasks.
    async fn category_exists(&self, id: CategoryId) -> TaskRepositoryResult<bool>;

    /// Returns the filtered, sorted and windowed listings of a query, each
    /// joined with its category name.
    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>>;

    /// Counts all tasks matching the filter, ignoring any window.
    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
