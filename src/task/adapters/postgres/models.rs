//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Step value.
    pub step: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional category reference.
    pub category_id: Option<i64>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Step value.
    pub step: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional category reference.
    pub category_id: Option<i64>,
}

/// Changeset applied by explicit task updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub is_completed: bool,
    /// Step value.
    pub step: i32,
    /// Optional category reference.
    pub category_id: Option<i64>,
}

/// Task joined with its category name, loaded by raw search SQL.
#[derive(Debug, Clone, QueryableByName)]
pub struct TaskListingRow {
    /// Storage-assigned identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Completion flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_completed: bool,
    /// Step value.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub step: i32,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Optional category reference.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::BigInt>)]
    pub category_id: Option<i64>,
    /// Joined category name; `NULL` when the category does not resolve.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub category_name: Option<String>,
}

/// Single-column count result.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct CountRow {
    /// Number of matching rows.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
}

/// Single-column existence result.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct ExistsRow {
    /// Whether a matching row exists.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub present: bool,
}
