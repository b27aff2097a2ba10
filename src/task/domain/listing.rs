//! Read-side shapes returned by task queries.

use super::Task;
use crate::category::domain::CategoryName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task together with the name of its category, as read from storage.
///
/// `category_name` is `None` when the task is uncategorized or its category
/// row no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    /// The stored task.
    pub task: Task,
    /// Name of the referenced category, when it resolves.
    pub category_name: Option<CategoryName>,
}

impl TaskListing {
    /// Creates a listing for a task and its resolved category name.
    #[must_use]
    pub const fn new(task: Task, category_name: Option<CategoryName>) -> Self {
        Self {
            task,
            category_name,
        }
    }
}

/// Compact task projection returned by plain searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Step value.
    pub step: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            is_completed: task.is_completed(),
            step: task.step(),
            created_at: task.created_at(),
        }
    }
}

/// Identifier used on the wire for "no category".
pub const UNCATEGORIZED_ID: i64 = 0;

/// Task projection joined with its category.
///
/// Tasks without a resolvable category carry the sentinel
/// `category_id == 0` and `category_name == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithCategory {
    /// Task fields.
    #[serde(flatten)]
    pub summary: TaskSummary,
    /// Category identifier, or [`UNCATEGORIZED_ID`].
    pub category_id: i64,
    /// Category name, absent for the sentinel.
    pub category_name: Option<String>,
}

impl TaskWithCategory {
    /// Returns whether this row carries the uncategorized sentinel.
    #[must_use]
    pub const fn is_uncategorized(&self) -> bool {
        self.category_id == UNCATEGORIZED_ID
    }
}

impl From<&TaskListing> for TaskWithCategory {
    fn from(listing: &TaskListing) -> Self {
        let summary = TaskSummary::from(&listing.task);
        match (listing.task.category_id(), listing.category_name.as_ref()) {
            (Some(id), Some(name)) => Self {
                summary,
                category_id: id.value(),
                category_name: Some(name.as_str().to_owned()),
            },
            _ => Self {
                summary,
                category_id: UNCATEGORIZED_ID,
                category_name: None,
            },
        }
    }
}

/// One page of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedPage<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Number of rows matching the filters across all pages.
    pub total: u64,
    /// One-based page number that was requested.
    pub page: u64,
    /// Requested page size.
    pub page_size: u32,
}

impl<T> CountedPage<T> {
    /// Returns the number of pages needed to show every match.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }
}
