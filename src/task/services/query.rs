//! Task search entry points.
//!
//! Each entry point validates its raw parameters against its own page-size
//! bound, then delegates filtering, ordering and windowing to the
//! repository. Only [`TaskQueryService::advanced_search`] reports a total.

use crate::config::QueryLimits;
use crate::task::{
    domain::{
        CountedPage, CriteriaError, PageWindow, SortKey, TaskFilter, TaskListing, TaskQuery,
        TaskSearchParams, TaskSummary, TaskWithCategory,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by task query operations.
#[derive(Debug, Error)]
pub enum TaskQueryError {
    /// A search parameter was rejected before storage was touched.
    #[error("invalid argument `{field}`: {0}", field = .0.field())]
    InvalidArgument(#[from] CriteriaError),

    /// The storage collaborator failed.
    #[error("task storage unavailable: {0}")]
    StorageUnavailable(#[from] TaskRepositoryError),
}

/// Result type for task query operations.
pub type TaskQueryResult<T> = Result<T, TaskQueryError>;

/// Read-side service for task searches and listings.
#[derive(Clone)]
pub struct TaskQueryService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    limits: QueryLimits,
}

impl<R> TaskQueryService<R>
where
    R: TaskRepository,
{
    /// Creates a query service with the given page-size limits.
    #[must_use]
    pub const fn new(repository: Arc<R>, limits: QueryLimits) -> Self {
        Self { repository, limits }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> QueryLimits {
        self.limits
    }

    /// Filters, sorts and pages tasks without reporting a total.
    ///
    /// Page sizes are bounded by [`QueryLimits::search_max_page_size`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::InvalidArgument`] for a rejected page, page
    /// size or category id, or [`TaskQueryError::StorageUnavailable`] when
    /// the repository fails.
    pub async fn search(&self, params: TaskSearchParams) -> TaskQueryResult<Vec<TaskSummary>> {
        let criteria = self.limits.search_builder().build(params)?;
        let query = criteria.to_query();
        log_query("search", &query);

        let listings = self.repository.search(&query).await?;
        Ok(summaries(&listings))
    }

    /// Filters, sorts and pages tasks joined with their category, reporting
    /// the total number of matches.
    ///
    /// Page sizes are bounded by [`QueryLimits::advanced_max_page_size`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::InvalidArgument`] for a rejected parameter,
    /// or [`TaskQueryError::StorageUnavailable`] when the repository fails.
    pub async fn advanced_search(
        &self,
        params: TaskSearchParams,
    ) -> TaskQueryResult<CountedPage<TaskWithCategory>> {
        let criteria = self.limits.advanced_builder().build(params)?;
        let query = criteria.to_query();
        log_query("advanced_search", &query);

        let total = self.repository.count(criteria.filter()).await?;
        let listings = self.repository.search(&query).await?;
        let page = criteria.page();
        debug!(total, returned = listings.len(), "advanced search complete");

        Ok(CountedPage {
            items: listings.iter().map(TaskWithCategory::from).collect(),
            total,
            page: page.page(),
            page_size: page.page_size(),
        })
    }

    /// Returns one page of tasks in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::InvalidArgument`] for a rejected page or
    /// page size, or [`TaskQueryError::StorageUnavailable`] when the
    /// repository fails.
    pub async fn paged(
        &self,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> TaskQueryResult<Vec<TaskSummary>> {
        let request = self.limits.search_builder().page_request(page, page_size)?;
        let query =
            TaskQuery::new(TaskFilter::new(), SortKey::IdAscending).with_window(request.window());
        log_query("paged", &query);

        let listings = self.repository.search(&query).await?;
        Ok(summaries(&listings))
    }

    /// Returns every task joined with its category, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::StorageUnavailable`] when the repository
    /// fails.
    pub async fn list_with_category(&self) -> TaskQueryResult<Vec<TaskWithCategory>> {
        let query = TaskQuery::new(TaskFilter::new(), SortKey::IdAscending);
        let listings = self.repository.search(&query).await?;
        Ok(listings.iter().map(TaskWithCategory::from).collect())
    }

    /// Returns the first tasks whose title contains `text`, in identifier
    /// order and capped at [`QueryLimits::quick_search_limit`].
    ///
    /// A missing or blank `text` matches every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::StorageUnavailable`] when the repository
    /// fails.
    pub async fn quick_search(&self, text: Option<&str>) -> TaskQueryResult<Vec<TaskSummary>> {
        let filter = text.map_or_else(TaskFilter::new, |value| {
            TaskFilter::new().with_text(value)
        });
        let window = PageWindow::new(0, u64::from(self.limits.quick_search_limit));
        let query = TaskQuery::new(filter, SortKey::IdAscending).with_window(window);
        log_query("quick_search", &query);

        let listings = self.repository.search(&query).await?;
        Ok(summaries(&listings))
    }
}

fn summaries(listings: &[TaskListing]) -> Vec<TaskSummary> {
    listings
        .iter()
        .map(|listing| TaskSummary::from(&listing.task))
        .collect()
}

fn log_query(operation: &'static str, query: &TaskQuery) {
    let window = query.window();
    debug!(
        operation,
        sort = query.sort().as_param(),
        offset = window.map(PageWindow::offset),
        limit = window.map(PageWindow::limit),
        "running task query"
    );
}
