//! Validated category name type and its case-folded dedup key.

use super::CategoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a category name, matching the `VARCHAR(100)` column.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Trimmed, non-empty category display name.
///
/// Names are compared case-insensitively through [`CategoryName::folded`];
/// the original casing is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a validated category name.
    ///
    /// Surrounding whitespace is trimmed. Internal whitespace is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryDomainError::EmptyCategoryName`] when the value is
    /// empty after trimming, or [`CategoryDomainError::CategoryNameTooLong`]
    /// when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, CategoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CategoryDomainError::EmptyCategoryName);
        }

        if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            return Err(CategoryDomainError::CategoryNameTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-folded dedup key for this name.
    #[must_use]
    pub fn folded(&self) -> String {
        fold_name(&self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-folds a category name for case-insensitive comparison.
///
/// Only case is normalized; callers trim beforehand.
#[must_use]
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
