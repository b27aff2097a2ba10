//! `PostgreSQL` repository implementation for category storage.

use super::{
    models::{CategoryRow, NewCategoryRow},
    schema::categories,
};
use crate::category::{
    domain::{Category, CategoryId, CategoryName, NewCategory, PersistedCategoryData, fold_name},
    ports::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use std::collections::HashSet;

/// `PostgreSQL` connection pool type used by category adapters.
pub type CategoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// Name of the unique index over `LOWER(name)`.
const FOLDED_NAME_INDEX: &str = "idx_categories_name_folded_unique";

/// Rows per `INSERT` statement; three binds per row stays under the
/// 65 535 bind-parameter limit of the wire protocol.
const BATCH_CHUNK_ROWS: usize = 10_000;

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: CategoryPgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CategoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CategoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CategoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CategoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_by_name(&self) -> CategoryRepositoryResult<Vec<Category>> {
        self.run_blocking(|connection| {
            let rows = categories::table
                .order((
                    sql::<Text>("name COLLATE \"C\" ASC"),
                    categories::id.asc(),
                ))
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_category).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Option<Category>> {
        self.run_blocking(move |connection| {
            let row = categories::table
                .find(id.value())
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?;
            row.map(row_to_category).transpose()
        })
        .await
    }

    async fn store(&self, category: &NewCategory) -> CategoryRepositoryResult<Category> {
        let name = category.name().clone();
        let new_row = to_new_row(category);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(categories::table)
                .values(&new_row)
                .returning(CategoryRow::as_returning())
                .get_result::<CategoryRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_folded_name_violation(info.as_ref()) =>
                    {
                        CategoryRepositoryError::DuplicateName(name.clone())
                    }
                    _ => CategoryRepositoryError::persistence(err),
                })?;
            row_to_category(row)
        })
        .await
    }

    async fn store_batch(&self, categories: &[NewCategory]) -> CategoryRepositoryResult<usize> {
        let new_rows: Vec<NewCategoryRow> = categories.iter().map(to_new_row).collect();

        self.run_blocking(move |connection| {
            // All chunks share one transaction; a violation in any chunk
            // rolls back the ones already sent.
            connection
                .transaction::<usize, DieselError, _>(|tx| {
                    let mut inserted = 0;
                    for chunk in new_rows.chunks(BATCH_CHUNK_ROWS) {
                        inserted += diesel::insert_into(categories::table)
                            .values(chunk)
                            .execute(tx)?;
                    }
                    Ok(inserted)
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_folded_name_violation(info.as_ref()) =>
                    {
                        CategoryRepositoryError::BatchConflict(
                            info.details().unwrap_or_else(|| info.message()).to_owned(),
                        )
                    }
                    _ => CategoryRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn folded_names(&self) -> CategoryRepositoryResult<HashSet<String>> {
        self.run_blocking(|connection| {
            let names = categories::table
                .select(categories::name)
                .load::<String>(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            Ok(names.iter().map(|name| fold_name(name.trim())).collect())
        })
        .await
    }
}

fn to_new_row(category: &NewCategory) -> NewCategoryRow {
    NewCategoryRow {
        name: category.name().as_str().to_owned(),
        code: category.code().map(str::to_owned),
        is_active: category.is_active(),
    }
}

fn row_to_category(row: CategoryRow) -> CategoryRepositoryResult<Category> {
    let CategoryRow {
        id,
        name,
        code,
        is_active,
    } = row;

    let data = PersistedCategoryData {
        id: CategoryId::new(id),
        name: CategoryName::new(name).map_err(CategoryRepositoryError::persistence)?,
        code,
        active: is_active,
    };
    Ok(Category::from_persisted(data))
}

fn is_folded_name_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == FOLDED_NAME_INDEX)
}
