//! Repository port for category persistence and import support.

use crate::category::domain::{Category, CategoryId, CategoryName, NewCategory};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category repository operations.
pub type CategoryRepositoryResult<T> = Result<T, CategoryRepositoryError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns every stored category ordered by name, ties broken by
    /// identifier.
    async fn list_by_name(&self) -> CategoryRepositoryResult<Vec<Category>>;

    /// Finds a category by identifier.
    ///
    /// Returns `None` when the category does not exist.
    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>>;

    /// Stores a new category and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateName`] when a category with
    /// the same case-folded name already exists.
    async fn store(&self, category: &NewCategory) -> CategoryRepositoryResult<Category>;

    /// Stores every category in one batch and returns the number written.
    ///
    /// The batch is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::DuplicateName`] or
    /// [`CategoryRepositoryError::BatchConflict`] when any name collides with
    /// a stored category.
    async fn store_batch(&self, categories: &[NewCategory]) -> CategoryRepositoryResult<usize>;

    /// Returns the case-folded names of all stored categories in one read.
    async fn folded_names(&self) -> CategoryRepositoryResult<HashSet<String>>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryRepositoryError {
    /// A category with the same case-folded name already exists.
    #[error("duplicate category name: {0}")]
    DuplicateName(CategoryName),

    /// A batch insert hit the name uniqueness constraint.
    #[error("category batch rejected by uniqueness constraint: {0}")]
    BatchConflict(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
