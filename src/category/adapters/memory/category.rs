//! In-memory repository for categories.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::category::{
    domain::{Category, CategoryId, CategoryName, NewCategory},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};

/// Thread-safe in-memory category repository.
///
/// Clones share the same state, so a clone can be handed to the in-memory
/// task repository for category joins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<InMemoryCategoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryCategoryState {
    categories: BTreeMap<CategoryId, Category>,
    name_index: HashSet<String>,
    last_id: i64,
}

impl InMemoryCategoryState {
    fn insert(&mut self, candidate: &NewCategory) -> Category {
        self.last_id += 1;
        let category = candidate.clone().into_category(CategoryId::new(self.last_id));
        self.name_index.insert(category.name().folded());
        self.categories.insert(category.id(), category.clone());
        category
    }
}

impl InMemoryCategoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the name of every stored category keyed by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn names_by_id(&self) -> CategoryRepositoryResult<HashMap<CategoryId, CategoryName>> {
        let state = self.read()?;
        Ok(state
            .categories
            .values()
            .map(|category| (category.id(), category.name().clone()))
            .collect())
    }

    fn read(&self) -> CategoryRepositoryResult<RwLockReadGuard<'_, InMemoryCategoryState>> {
        self.state.read().map_err(|err| {
            CategoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> CategoryRepositoryResult<RwLockWriteGuard<'_, InMemoryCategoryState>> {
        self.state.write().map_err(|err| {
            CategoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list_by_name(&self) -> CategoryRepositoryResult<Vec<Category>> {
        let state = self.read()?;
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|left, right| {
            left.name()
                .as_str()
                .cmp(right.name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(categories)
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        let state = self.read()?;
        Ok(state.categories.get(&id).cloned())
    }

    async fn store(&self, category: &NewCategory) -> CategoryRepositoryResult<Category> {
        let mut state = self.write()?;
        if state.name_index.contains(&category.name().folded()) {
            return Err(CategoryRepositoryError::DuplicateName(
                category.name().clone(),
            ));
        }
        Ok(state.insert(category))
    }

    async fn store_batch(&self, categories: &[NewCategory]) -> CategoryRepositoryResult<usize> {
        let mut state = self.write()?;

        // Validate the whole batch before writing so a conflict leaves no
        // partial insert behind.
        let mut batch_names = HashSet::with_capacity(categories.len());
        for category in categories {
            let folded = category.name().folded();
            if state.name_index.contains(&folded) || !batch_names.insert(folded) {
                return Err(CategoryRepositoryError::DuplicateName(
                    category.name().clone(),
                ));
            }
        }

        for category in categories {
            state.insert(category);
        }
        Ok(categories.len())
    }

    async fn folded_names(&self) -> CategoryRepositoryResult<HashSet<String>> {
        let state = self.read()?;
        Ok(state.name_index.clone())
    }
}
