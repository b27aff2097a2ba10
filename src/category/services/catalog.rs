//! Service layer for category creation and lookup.

use crate::category::{
    domain::{Category, CategoryDomainError, CategoryId, CategoryName, NewCategory},
    ports::{CategoryRepository, CategoryRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a category by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    name: String,
}

impl CreateCategoryRequest {
    /// Creates a request with the category name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Service-level errors for category catalogue operations.
#[derive(Debug, Error)]
pub enum CategoryCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CategoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CategoryRepositoryError),
}

/// Result type for category catalogue service operations.
pub type CategoryCatalogResult<T> = Result<T, CategoryCatalogError>;

/// Category catalogue orchestration service.
#[derive(Clone)]
pub struct CategoryCatalogService<R>
where
    R: CategoryRepository,
{
    repository: Arc<R>,
}

impl<R> CategoryCatalogService<R>
where
    R: CategoryRepository,
{
    /// Creates a new category catalogue service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every category ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> CategoryCatalogResult<Vec<Category>> {
        Ok(self.repository.list_by_name().await?)
    }

    /// Creates an active category with no code.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryCatalogError::Domain`] when the name is blank or too
    /// long, or [`CategoryCatalogError::Repository`] when storage rejects it
    /// (including a case-insensitive duplicate name).
    pub async fn create(&self, request: CreateCategoryRequest) -> CategoryCatalogResult<Category> {
        let name = CategoryName::new(request.name)?;
        let category = self.repository.store(&NewCategory::new(name)).await?;
        debug!(category_id = %category.id(), "category created");
        Ok(category)
    }

    /// Finds a category by identifier.
    ///
    /// Returns `Ok(None)` when the category does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: CategoryId) -> CategoryCatalogResult<Option<Category>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
