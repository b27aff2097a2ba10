//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{CountRow, ExistsRow, NewTaskRow, TaskChangeset, TaskListingRow, TaskRow},
    schema::tasks,
    sql::{BindValue, RenderedSql, count_sql, listing_sql},
};
use crate::category::domain::{CategoryId, CategoryName};
use crate::task::{
    domain::{
        NewTask, PersistedTaskData, Task, TaskFilter, TaskId, TaskListing, TaskQuery, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{BigInt, Bool, Integer, Text};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = NewTaskRow {
            title: task.title().as_str().to_owned(),
            is_completed: false,
            step: task.step(),
            created_at: task.created_at(),
            category_id: task.category_id().map(CategoryId::value),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = TaskChangeset {
            title: task.title().as_str().to_owned(),
            is_completed: task.is_completed(),
            step: task.step(),
            category_id: task.category_id().map(CategoryId::value),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(tasks::table.find(id.value())))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn category_exists(&self, id: CategoryId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(
                "SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1) AS present",
            )
            .bind::<BigInt, _>(id.value())
            .get_result::<ExistsRow>(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(row.present)
        })
        .await
    }

    async fn search(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<TaskListing>> {
        let rendered = listing_sql(query);
        self.run_blocking(move |connection| {
            let rows = boxed_query(rendered)
                .load::<TaskListingRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_listing).collect()
        })
        .await
    }

    async fn count(&self, filter: &TaskFilter) -> TaskRepositoryResult<u64> {
        let rendered = count_sql(filter);
        self.run_blocking(move |connection| {
            let row = boxed_query(rendered)
                .get_result::<CountRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(row.total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn boxed_query(rendered: RenderedSql) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    let RenderedSql { text, binds, .. } = rendered;
    binds
        .into_iter()
        .fold(diesel::sql_query(text).into_boxed::<Pg>(), bind_value)
}

fn bind_value(
    query: BoxedSqlQuery<'static, Pg, SqlQuery>,
    value: BindValue,
) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
    match value {
        BindValue::Text(text) => query.bind::<Text, _>(text),
        BindValue::Bool(flag) => query.bind::<Bool, _>(flag),
        BindValue::Int(number) => query.bind::<Integer, _>(number),
        BindValue::BigInt(number) => query.bind::<BigInt, _>(number),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        is_completed,
        step,
        created_at,
        category_id,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        completed: is_completed,
        step,
        created_at,
        category_id: CategoryId::from_nullable(category_id),
    };
    Ok(Task::from_persisted(data))
}

fn row_to_listing(row: TaskListingRow) -> TaskRepositoryResult<TaskListing> {
    let TaskListingRow {
        id,
        title,
        is_completed,
        step,
        created_at,
        category_id,
        category_name,
    } = row;

    let task = row_to_task(TaskRow {
        id,
        title,
        is_completed,
        step,
        created_at,
        category_id,
    })?;
    let name = category_name
        .map(CategoryName::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    Ok(TaskListing::new(task, name))
}
