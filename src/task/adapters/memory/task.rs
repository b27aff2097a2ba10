//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::category::{
    adapters::memory::InMemoryCategoryRepository,
    domain::{CategoryId, CategoryName},
};
use crate::task::{
    domain::{NewTask, Task, TaskFilter, TaskId, TaskListing, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Category joins read from the shared category repository handed in at
/// construction.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    categories: InMemoryCategoryRepository,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty task repository joined to `categories`.
    #[must_use]
    pub fn new(categories: InMemoryCategoryRepository) -> Self {
        Self {
            state: Arc::default(),
            categories,
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn category_names(&self) -> TaskRepositoryResult<HashMap<CategoryId, CategoryName>> {
        self.categories
            .names_by_id()
            .map_err(TaskRepositoryError::persistence)
    }

    /// Joins every stored task with its category name.
    fn listings(&self) -> TaskRepositoryResult<Vec<TaskListing>> {
        let names = self.category_names()?;
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .map(|task| {
                let category_name = task
                    .category_id()
                    .and_then(|id| names.get(&id))
                    .cloned();
                TaskListing::new(task.clone(), category_name)
            })
            .collect())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.last_id += 1;
        let stored = task.clone().into_task(TaskId::new(state.last_id));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let current = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *current = task.clone();
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.tasks.contains_key(&id))
    }

    async fn category_exists(&self, id: CategoryId) -> TaskRepositoryResult<bool> {
        Ok(self.category_names()?.contains_key(&id))
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>> {
        Ok(query.apply(self.listings()?))
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let matched = self
            .listings()?
            .iter()
            .filter(|listing| filter.matches(listing))
            .count();
        u64::try_from(matched).map_err(TaskRepositoryError::persistence)
    }
}
