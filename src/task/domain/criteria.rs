//! Builds validated task criteria from raw request parameters.

use super::{CategoryFilter, PageWindow, SortKey, TaskFilter, TaskQuery};
use crate::category::domain::CategoryId;
use thiserror::Error;

/// Raw, unvalidated search parameters as received from a caller.
///
/// Every field is optional. Page and page size fall back to 1 and the
/// builder's default size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSearchParams {
    text: Option<String>,
    completed: Option<bool>,
    step: Option<i32>,
    category_id: Option<i64>,
    category_name: Option<String>,
    order_by: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

impl TaskSearchParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title substring.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the completion filter.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the exact step filter.
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the category id filter; `0` selects uncategorized tasks.
    #[must_use]
    pub const fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the category-name substring.
    #[must_use]
    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Sets the textual sort key.
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Sets the one-based page number.
    #[must_use]
    pub const fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Field-level rejection of search parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// The page number is below 1.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),

    /// The page size lies outside `1..=max`.
    #[error("page size must be between 1 and {max}, got {value}")]
    InvalidPageSize {
        /// Requested page size.
        value: i64,
        /// Largest accepted page size for the entry point.
        max: u32,
    },

    /// The category id is negative.
    #[error("category id must not be negative, got {0}")]
    InvalidCategoryId(i64),
}

impl CriteriaError {
    /// Returns the name of the rejected parameter.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidPage(_) => "page",
            Self::InvalidPageSize { .. } => "pageSize",
            Self::InvalidCategoryId(_) => "categoryId",
        }
    }
}

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u32,
}

impl PageRequest {
    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns the row window of this page.
    #[must_use]
    pub fn window(self) -> PageWindow {
        PageWindow::for_page(self.page, self.page_size)
    }
}

/// Validated filter, sort order and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCriteria {
    filter: TaskFilter,
    sort: SortKey,
    page: PageRequest,
}

impl TaskCriteria {
    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Returns the page request.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }

    /// Converts the criteria into a windowed storage query.
    #[must_use]
    pub fn to_query(&self) -> TaskQuery {
        TaskQuery::new(self.filter.clone(), self.sort).with_window(self.page.window())
    }
}

/// Validates raw parameters against the page-size bound of one entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaBuilder {
    max_page_size: u32,
    default_page_size: u32,
}

impl CriteriaBuilder {
    /// Creates a builder accepting page sizes in `1..=max_page_size`.
    ///
    /// The default page size is clamped into the accepted range.
    #[must_use]
    pub fn new(max_page_size: u32, default_page_size: u32) -> Self {
        let max = max_page_size.max(1);
        Self {
            max_page_size: max,
            default_page_size: default_page_size.clamp(1, max),
        }
    }

    /// Returns the largest accepted page size.
    #[must_use]
    pub const fn max_page_size(self) -> u32 {
        self.max_page_size
    }

    /// Validates parameters into criteria.
    ///
    /// Unknown sort keys fall back to ascending id; blank text filters are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError`] when the page is below 1, the page size is
    /// out of bounds, or the category id is negative.
    pub fn build(self, params: TaskSearchParams) -> Result<TaskCriteria, CriteriaError> {
        let TaskSearchParams {
            text,
            completed,
            step,
            category_id,
            category_name,
            order_by,
            page,
            page_size,
        } = params;

        let page_request = self.page_request(page, page_size)?;

        let mut filter = TaskFilter::new();
        if let Some(value) = text {
            filter = filter.with_text(value);
        }
        if let Some(flag) = completed {
            filter = filter.with_completed(flag);
        }
        if let Some(value) = step {
            filter = filter.with_step(value);
        }
        if let Some(raw_id) = category_id {
            filter = filter.with_category(category_filter(raw_id)?);
        }
        if let Some(name) = category_name {
            filter = filter.with_category_name(name);
        }

        Ok(TaskCriteria {
            filter,
            sort: SortKey::from_param(order_by.as_deref()),
            page: page_request,
        })
    }

    /// Validates a bare page request.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError`] when the page is below 1 or the page size is
    /// out of bounds.
    pub fn page_request(
        self,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<PageRequest, CriteriaError> {
        let raw_page = page.unwrap_or(1);
        let valid_page = u64::try_from(raw_page)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(CriteriaError::InvalidPage(raw_page))?;

        let raw_size = page_size.unwrap_or_else(|| i64::from(self.default_page_size));
        let valid_size = u32::try_from(raw_size)
            .ok()
            .filter(|value| (1..=self.max_page_size).contains(value))
            .ok_or(CriteriaError::InvalidPageSize {
                value: raw_size,
                max: self.max_page_size,
            })?;

        Ok(PageRequest {
            page: valid_page,
            page_size: valid_size,
        })
    }
}

fn category_filter(raw_id: i64) -> Result<CategoryFilter, CriteriaError> {
    match raw_id {
        0 => Ok(CategoryFilter::Uncategorized),
        id if id > 0 => Ok(CategoryFilter::Id(CategoryId::new(id))),
        negative => Err(CriteriaError::InvalidCategoryId(negative)),
    }
}
