//! Diesel row models for category persistence.

use super::schema::categories;
use diesel::prelude::*;

/// Query result row for category records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional short code.
    pub code: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

/// Insert model for category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    /// Display name.
    pub name: String,
    /// Optional short code.
    pub code: Option<String>,
    /// Active flag.
    pub is_active: bool,
}
