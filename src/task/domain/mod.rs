//! Domain model for tasks and task queries.
//!
//! Tasks are storage-identified work items with an optional category link.
//! The query types describe filter, sort order and paging independently of
//! any storage engine.

mod criteria;
mod error;
mod ids;
mod listing;
mod query;
mod task;

pub use criteria::{CriteriaBuilder, CriteriaError, PageRequest, TaskCriteria, TaskSearchParams};
pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use listing::{CountedPage, TaskListing, TaskSummary, TaskWithCategory, UNCATEGORIZED_ID};
pub use query::{CategoryFilter, PageWindow, SortKey, TaskFilter, TaskQuery};
pub use task::{NewTask, PersistedTaskData, Task};
