//! Identifier types for the category domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier for a category record.
///
/// Identifiers are always positive. The value `0` is reserved on the wire for
/// the "uncategorized" sentinel and never names a stored category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Wraps a storage-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Interprets a nullable foreign-key column.
    ///
    /// `None`, `0` and negative values all mean "uncategorized".
    #[must_use]
    pub fn from_nullable(value: Option<i64>) -> Option<Self> {
        value.filter(|raw| *raw > 0).map(Self)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
