//! Port contracts for category storage and upload decoding.
//!
//! Ports define infrastructure-agnostic interfaces used by category services.

pub mod repository;
pub mod tabular;

pub use repository::{CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult};
pub use tabular::{TabularDecodeError, TabularDecoder};
