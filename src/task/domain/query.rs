//! Validated task query: filters, sort order and result window.
//!
//! [`TaskQuery::apply`] is the reference evaluation of a query over listings
//! held in memory. Storage adapters that push the query down to a database
//! must produce the same rows in the same order.

use super::{Task, TaskListing};
use crate::category::domain::{CategoryId, fold_name};
use std::cmp::Ordering;

/// Allowed sort orders for task searches.
///
/// Every key breaks ties by ascending task identifier, which makes the order
/// total and pagination stable across repeated calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Ascending identifier.
    #[default]
    IdAscending,
    /// Title, A to Z.
    TitleAscending,
    /// Title, Z to A.
    TitleDescending,
    /// Oldest first.
    CreatedAscending,
    /// Newest first.
    CreatedDescending,
    /// Lowest step first.
    StepAscending,
    /// Highest step first.
    StepDescending,
}

impl SortKey {
    /// Maps a textual `orderBy` parameter to a sort key.
    ///
    /// Unknown or missing values select [`SortKey::IdAscending`] instead of
    /// failing.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => Self::TitleAscending,
            Some("title_desc") => Self::TitleDescending,
            Some("date") => Self::CreatedAscending,
            Some("date_desc") => Self::CreatedDescending,
            Some("step") => Self::StepAscending,
            Some("step_desc") => Self::StepDescending,
            _ => Self::IdAscending,
        }
    }

    /// Returns the canonical parameter spelling.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::IdAscending => "id",
            Self::TitleAscending => "title",
            Self::TitleDescending => "title_desc",
            Self::CreatedAscending => "date",
            Self::CreatedDescending => "date_desc",
            Self::StepAscending => "step",
            Self::StepDescending => "step_desc",
        }
    }

    /// Compares two tasks under this key, ties broken by ascending id.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let primary = match self {
            Self::IdAscending => Ordering::Equal,
            Self::TitleAscending => by_title(left, right),
            Self::TitleDescending => by_title(right, left),
            Self::CreatedAscending => by_created_at(left, right),
            Self::CreatedDescending => by_created_at(right, left),
            Self::StepAscending => by_step(left, right),
            Self::StepDescending => by_step(right, left),
        };
        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

fn by_title(left: &Task, right: &Task) -> Ordering {
    left.title().as_str().cmp(right.title().as_str())
}

fn by_created_at(left: &Task, right: &Task) -> Ordering {
    left.created_at().cmp(&right.created_at())
}

fn by_step(left: &Task, right: &Task) -> Ordering {
    left.step().cmp(&right.step())
}

/// Category constraint of a task filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Only tasks without a category.
    Uncategorized,
    /// Only tasks linked to the given category.
    Id(CategoryId),
}

/// Conjunction of optional task predicates.
///
/// Absent predicates impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    text: Option<String>,
    completed: Option<bool>,
    step: Option<i32>,
    category: Option<CategoryFilter>,
    category_name: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the title to contain `text` (case-sensitive).
    ///
    /// Blank text clears any previous text requirement.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = non_blank(text.into());
        self
    }

    /// Requires the completion flag to equal `completed`.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Requires the step to equal `step`.
    #[must_use]
    pub const fn with_step(mut self, step: i32) -> Self {
        self.step = Some(step);
        self
    }

    /// Restricts tasks by category reference.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = Some(category);
        self
    }

    /// Requires the joined category name to contain `name`, ignoring case.
    ///
    /// Blank names leave the filter unchanged.
    #[must_use]
    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = non_blank(name.into());
        self
    }

    /// Returns the title substring, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the completion constraint, if any.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns the step constraint, if any.
    #[must_use]
    pub const fn step(&self) -> Option<i32> {
        self.step
    }

    /// Returns the category constraint, if any.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryFilter> {
        self.category
    }

    /// Returns the category-name substring, if any.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    /// Returns whether a listing satisfies every predicate.
    ///
    /// Equality checks run before substring checks.
    #[must_use]
    pub fn matches(&self, listing: &TaskListing) -> bool {
        let task = &listing.task;
        self.completed.is_none_or(|flag| task.is_completed() == flag)
            && self.step.is_none_or(|step| task.step() == step)
            && self.category.is_none_or(|category| match category {
                CategoryFilter::Uncategorized => task.category_id().is_none(),
                CategoryFilter::Id(id) => task.category_id() == Some(id),
            })
            && self
                .text
                .as_deref()
                .is_none_or(|text| task.title().as_str().contains(text))
            && self.category_name.as_deref().is_none_or(|wanted| {
                listing
                    .category_name
                    .as_ref()
                    .is_some_and(|name| fold_name(name.as_str()).contains(&fold_name(wanted)))
            })
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Row window of a query: rows to skip, then rows to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Creates a window from raw offset and limit.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Window of the one-based `page` with `page_size` rows.
    ///
    /// Page numbers below 1 are treated as page 1, so the offset is never
    /// negative.
    #[must_use]
    pub fn for_page(page: u64, page_size: u32) -> Self {
        let skipped_pages = page.saturating_sub(1);
        Self {
            offset: skipped_pages.saturating_mul(u64::from(page_size)),
            limit: u64::from(page_size),
        }
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of rows returned.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }
}

/// Filters, order and optional window handed to task storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filter: TaskFilter,
    sort: SortKey,
    window: Option<PageWindow>,
}

impl TaskQuery {
    /// Creates an unwindowed query.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort: SortKey) -> Self {
        Self {
            filter,
            sort,
            window: None,
        }
    }

    /// Restricts the query to a window of rows.
    #[must_use]
    pub const fn with_window(mut self, window: PageWindow) -> Self {
        self.window = Some(window);
        self
    }

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

    /// Returns the window, if any.
    #[must_use]
    pub const fn window(&self) -> Option<PageWindow> {
        self.window
    }

    /// Filters, sorts and windows listings held in memory.
    ///
    /// A window that starts past the last match yields an empty result.
    #[must_use]
    pub fn apply(&self, listings: impl IntoIterator<Item = TaskListing>) -> Vec<TaskListing> {
        let mut matched: Vec<TaskListing> = listings
            .into_iter()
            .filter(|listing| self.filter.matches(listing))
            .collect();
        matched.sort_by(|left, right| self.sort.compare(&left.task, &right.task));

        let Some(window) = self.window else {
            return matched;
        };
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        matched.into_iter().skip(offset).take(limit).collect()
    }
}
