//! Pure steps of the category spreadsheet import.
//!
//! [`rows`] maps a decoded worksheet to raw rows; [`dedup`] turns raw rows
//! into the insert set.

pub mod dedup;
pub mod rows;

pub use dedup::{
    ActiveFlag, candidate_from_row, candidates_from_rows, dedupe_within_batch, exclude_existing,
};
pub use rows::{RawCategoryRow, Worksheet, rows_from_worksheet};
