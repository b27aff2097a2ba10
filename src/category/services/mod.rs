//! Application services for the category catalogue and its import.

mod catalog;
mod import;

pub use catalog::{
    CategoryCatalogError, CategoryCatalogResult, CategoryCatalogService, CreateCategoryRequest,
};
pub use import::{CategoryImportService, ImportError, ImportResult, ImportSummary};
