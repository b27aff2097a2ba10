//! Category aggregate and its insert-side counterpart.

use super::{CategoryId, CategoryName};
use serde::{Deserialize, Serialize};

/// Category record owned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    code: Option<String>,
    active: bool,
}

/// Parameter object for reconstructing a persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCategoryData {
    /// Storage-assigned identifier.
    pub id: CategoryId,
    /// Persisted display name.
    pub name: CategoryName,
    /// Persisted short code, if any.
    pub code: Option<String>,
    /// Persisted active flag.
    pub active: bool,
}

impl Category {
    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCategoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            code: data.code,
            active: data.active,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the optional short code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns whether the category is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// A category that has not been stored yet.
///
/// Storage assigns the identifier on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    name: CategoryName,
    code: Option<String>,
    active: bool,
}

impl NewCategory {
    /// Creates an active category with no code.
    #[must_use]
    pub const fn new(name: CategoryName) -> Self {
        Self {
            name,
            code: None,
            active: true,
        }
    }

    /// Sets the short code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the category name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the optional short code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns whether the category will be stored as active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Binds a storage-assigned identifier, producing the stored record.
    #[must_use]
    pub fn into_category(self, id: CategoryId) -> Category {
        Category::from_persisted(PersistedCategoryData {
            id,
            name: self.name,
            code: self.code,
            active: self.active,
        })
    }
}
