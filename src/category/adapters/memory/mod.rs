//! In-memory adapters for category storage.

mod category;

pub use category::InMemoryCategoryRepository;
