//! Domain model for work-item categories.
//!
//! Categories are identified by storage-assigned integers and deduplicated
//! by case-folded name. The [`import`] submodule holds the pure parsing and
//! deduplication steps of the spreadsheet import.

mod category;
mod error;
mod ids;
pub mod import;
mod name;

pub use category::{Category, NewCategory, PersistedCategoryData};
pub use error::CategoryDomainError;
pub use ids::CategoryId;
pub use name::{CategoryName, MAX_CATEGORY_NAME_LENGTH, fold_name};
