//! Parameterised SQL for task searches.
//!
//! Filters are rendered into a `WHERE` clause with numbered placeholders and
//! a parallel list of bind values, so the same filter text serves both the
//! listing query and the count query.

use crate::task::domain::{CategoryFilter, SortKey, TaskFilter, TaskQuery};

const LISTING_SELECT: &str = concat!(
    "SELECT t.id, t.title, t.is_completed, t.step, t.created_at, t.category_id, ",
    "c.name AS category_name ",
    "FROM tasks t LEFT JOIN categories c ON c.id = t.category_id",
);

const COUNT_SELECT: &str = concat!(
    "SELECT COUNT(*) AS total ",
    "FROM tasks t LEFT JOIN categories c ON c.id = t.category_id",
);

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum BindValue {
    /// `TEXT` parameter.
    Text(String),
    /// `BOOL` parameter.
    Bool(bool),
    /// `INT4` parameter.
    Int(i32),
    /// `INT8` parameter.
    BigInt(i64),
}

/// SQL text with its bind values in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RenderedSql {
    pub text: String,
    pub binds: Vec<BindValue>,
    has_conditions: bool,
}

impl RenderedSql {
    fn new(select: &str) -> Self {
        Self {
            text: select.to_owned(),
            binds: Vec::new(),
            has_conditions: false,
        }
    }

    fn bind(&mut self, value: BindValue) -> String {
        self.binds.push(value);
        format!("${}", self.binds.len())
    }

    fn push_condition(&mut self, condition: &str) {
        let keyword = if self.has_conditions { " AND " } else { " WHERE " };
        self.has_conditions = true;
        self.text.push_str(keyword);
        self.text.push_str(condition);
    }
}

/// Renders the listing query: filters, total order and optional window.
pub(super) fn listing_sql(query: &TaskQuery) -> RenderedSql {
    let mut rendered = RenderedSql::new(LISTING_SELECT);
    push_filter(&mut rendered, query.filter());
    rendered.text.push_str(order_clause(query.sort()));

    if let Some(window) = query.window() {
        let limit = rendered.bind(BindValue::BigInt(saturating_i64(window.limit())));
        let offset = rendered.bind(BindValue::BigInt(saturating_i64(window.offset())));
        rendered
            .text
            .push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
    }
    rendered
}

/// Renders the count query for a filter.
pub(super) fn count_sql(filter: &TaskFilter) -> RenderedSql {
    let mut rendered = RenderedSql::new(COUNT_SELECT);
    push_filter(&mut rendered, filter);
    rendered
}

fn push_filter(rendered: &mut RenderedSql, filter: &TaskFilter) {
    if let Some(completed) = filter.completed() {
        let placeholder = rendered.bind(BindValue::Bool(completed));
        rendered.push_condition(&format!("t.is_completed = {placeholder}"));
    }
    if let Some(step) = filter.step() {
        let placeholder = rendered.bind(BindValue::Int(step));
        rendered.push_condition(&format!("t.step = {placeholder}"));
    }
    match filter.category() {
        Some(CategoryFilter::Uncategorized) => {
            rendered.push_condition("(t.category_id IS NULL OR t.category_id <= 0)");
        }
        Some(CategoryFilter::Id(id)) => {
            let placeholder = rendered.bind(BindValue::BigInt(id.value()));
            rendered.push_condition(&format!("t.category_id = {placeholder}"));
        }
        None => {}
    }
    if let Some(text) = filter.text() {
        let placeholder = rendered.bind(BindValue::Text(like_pattern(text)));
        rendered.push_condition(&format!("t.title LIKE {placeholder} ESCAPE '\\'"));
    }
    if let Some(name) = filter.category_name() {
        let placeholder = rendered.bind(BindValue::Text(like_pattern(name)));
        rendered.push_condition(&format!("c.name ILIKE {placeholder} ESCAPE '\\'"));
    }
}

/// Byte-wise title collation keeps the order identical to in-memory sorting.
const fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::IdAscending => " ORDER BY t.id ASC",
        SortKey::TitleAscending => " ORDER BY t.title COLLATE \"C\" ASC, t.id ASC",
        SortKey::TitleDescending => " ORDER BY t.title COLLATE \"C\" DESC, t.id ASC",
        SortKey::CreatedAscending => " ORDER BY t.created_at ASC, t.id ASC",
        SortKey::CreatedDescending => " ORDER BY t.created_at DESC, t.id ASC",
        SortKey::StepAscending => " ORDER BY t.step ASC, t.id ASC",
        SortKey::StepDescending => " ORDER BY t.step DESC, t.id ASC",
    }
}

/// Wraps text in `%` wildcards, escaping `LIKE` metacharacters.
pub(super) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
