//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;
mod sql;

pub use repository::{PostgresTaskRepository, TaskPgPool};
