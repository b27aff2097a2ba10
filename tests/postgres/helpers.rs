//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use taskdeck::{
    category::{
        adapters::{postgres::PostgresCategoryRepository, spreadsheet::SpreadsheetDecoder},
        services::{CategoryCatalogService, CategoryImportService},
    },
    config::QueryLimits,
    task::{
        adapters::postgres::PostgresTaskRepository,
        services::{TaskLifecycleService, TaskQueryService},
    },
};
use tokio::runtime::Runtime;

/// Boxed error used by the setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the `categories` and `tasks` tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-05-000000_create_categories_and_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskdeck_test_template";

/// Creates a tokio runtime for driving the async adapters.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            execute_sql_statements(&mut conn, CREATE_SCHEMA_SQL)?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Executes each `;`-separated statement of `sql` in turn.
fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|e| eyre::eyre!("SQL error: {e}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// Returns a database name unique to one test.
pub fn unique_db_name(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Every service wired to one temporary database.
pub struct PgBackend {
    /// Category storage.
    pub categories: Arc<PostgresCategoryRepository>,
    /// Category creation and lookup.
    pub catalog: CategoryCatalogService<PostgresCategoryRepository>,
    /// Spreadsheet import.
    pub import: CategoryImportService<PostgresCategoryRepository, SpreadsheetDecoder>,
    /// Task creation, update and removal.
    pub tasks: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    /// Task searches.
    pub queries: TaskQueryService<PostgresTaskRepository>,
}

/// Creates `db_name` from the template and wires the services to it.
///
/// # Errors
///
/// Returns an error if database creation or pool setup fails.
pub fn setup_backend(cluster: &TestCluster, db_name: &str) -> Result<PgBackend, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;

    let categories = Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let task_store = Arc::new(PostgresTaskRepository::new(pool));
    Ok(PgBackend {
        catalog: CategoryCatalogService::new(Arc::clone(&categories)),
        import: CategoryImportService::new(
            Arc::clone(&categories),
            Arc::new(SpreadsheetDecoder::new()),
        ),
        categories,
        tasks: TaskLifecycleService::new(Arc::clone(&task_store), Arc::new(DefaultClock)),
        queries: TaskQueryService::new(task_store, QueryLimits::default()),
    })
}

/// Drops the test database when the test ends, even on panic.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Registers `db_name` for removal.
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(db = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}
