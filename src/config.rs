//! Runtime configuration read from the process environment.
//!
//! [`QueryLimits`] bounds the page sizes accepted by each search entry
//! point. [`DatabaseConfig`] describes the `PostgreSQL` connection pool.

use crate::task::domain::CriteriaBuilder;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the task and category adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Page-size bounds for the task search entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Largest page size accepted by plain search and paged listing.
    pub search_max_page_size: u32,
    /// Largest page size accepted by advanced search.
    pub advanced_max_page_size: u32,
    /// Page size used when a caller supplies none.
    pub default_page_size: u32,
    /// Row cap of the unpaginated quick search.
    pub quick_search_limit: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            search_max_page_size: Self::DEFAULT_SEARCH_MAX_PAGE_SIZE,
            advanced_max_page_size: Self::DEFAULT_ADVANCED_MAX_PAGE_SIZE,
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            quick_search_limit: Self::DEFAULT_QUICK_SEARCH_LIMIT,
        }
    }
}

impl QueryLimits {
    const DEFAULT_SEARCH_MAX_PAGE_SIZE: u32 = 50;
    const DEFAULT_ADVANCED_MAX_PAGE_SIZE: u32 = 100;
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const DEFAULT_QUICK_SEARCH_LIMIT: u32 = 50;

    /// Environment variable bounding plain-search page sizes.
    pub const SEARCH_MAX_PAGE_SIZE_VAR: &'static str = "TASKDECK_SEARCH_MAX_PAGE_SIZE";
    /// Environment variable bounding advanced-search page sizes.
    pub const ADVANCED_MAX_PAGE_SIZE_VAR: &'static str = "TASKDECK_ADVANCED_MAX_PAGE_SIZE";
    /// Environment variable for the default page size.
    pub const DEFAULT_PAGE_SIZE_VAR: &'static str = "TASKDECK_DEFAULT_PAGE_SIZE";
    /// Environment variable capping quick-search results.
    pub const QUICK_SEARCH_LIMIT_VAR: &'static str = "TASKDECK_QUICK_SEARCH_LIMIT";

    /// Creates limits from environment variables or defaults.
    ///
    /// Environment variables:
    /// - `TASKDECK_SEARCH_MAX_PAGE_SIZE` (default: 50)
    /// - `TASKDECK_ADVANCED_MAX_PAGE_SIZE` (default: 100)
    /// - `TASKDECK_DEFAULT_PAGE_SIZE` (default: 10)
    /// - `TASKDECK_QUICK_SEARCH_LIMIT` (default: 50)
    ///
    /// Unparsable or zero values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates limits from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |name: &str, default: u32| {
            lookup(name)
                .and_then(|raw| raw.trim().parse::<u32>().ok())
                .filter(|&value| value > 0)
                .unwrap_or(default)
        };

        Self {
            search_max_page_size: positive(
                Self::SEARCH_MAX_PAGE_SIZE_VAR,
                Self::DEFAULT_SEARCH_MAX_PAGE_SIZE,
            ),
            advanced_max_page_size: positive(
                Self::ADVANCED_MAX_PAGE_SIZE_VAR,
                Self::DEFAULT_ADVANCED_MAX_PAGE_SIZE,
            ),
            default_page_size: positive(Self::DEFAULT_PAGE_SIZE_VAR, Self::DEFAULT_PAGE_SIZE),
            quick_search_limit: positive(
                Self::QUICK_SEARCH_LIMIT_VAR,
                Self::DEFAULT_QUICK_SEARCH_LIMIT,
            ),
        }
    }

    /// Criteria builder for plain search and paged listing.
    #[must_use]
    pub fn search_builder(self) -> CriteriaBuilder {
        CriteriaBuilder::new(self.search_max_page_size, self.default_page_size)
    }

    /// Criteria builder for advanced search.
    #[must_use]
    pub fn advanced_builder(self) -> CriteriaBuilder {
        CriteriaBuilder::new(self.advanced_max_page_size, self.default_page_size)
    }
}

/// Errors raised while reading database configuration or opening the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DATABASE_URL` is not set or blank.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    /// The pool size variable is not a positive integer.
    #[error("TASKDECK_DB_POOL_SIZE must be a positive integer, got {0:?}")]
    InvalidPoolSize(String),

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
}

impl DatabaseConfig {
    /// Default maximum number of pooled connections.
    pub const DEFAULT_POOL_SIZE: u32 = 8;

    /// Creates a configuration with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: Self::DEFAULT_POOL_SIZE,
        }
    }

    /// Overrides the maximum pool size; zero is raised to one.
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    /// Reads `DATABASE_URL` and `TASKDECK_DB_POOL_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when the URL is absent or
    /// blank, or [`ConfigError::InvalidPoolSize`] when the pool size is set
    /// but not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let pool_size = match lookup("TASKDECK_DB_POOL_SIZE") {
            None => Self::DEFAULT_POOL_SIZE,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&size| size > 0)
                .ok_or(ConfigError::InvalidPoolSize(raw))?,
        };

        Ok(Self { url, pool_size })
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Builds the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when no connection can be established.
    pub fn connect(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        let pool = Pool::builder().max_size(self.pool_size).build(manager)?;
        tracing::info!(pool_size = self.pool_size, "database pool ready");
        Ok(pool)
    }
}
