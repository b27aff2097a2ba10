//! Normalization and deduplication steps applied to imported rows.
//!
//! Each step is a total function over its input. The storage-facing step
//! takes the already-fetched set of folded names so that the bulk read stays
//! in the service layer.

use super::RawCategoryRow;
use crate::category::domain::{CategoryDomainError, CategoryName, NewCategory};
use std::collections::HashSet;
use std::hash::BuildHasher;
use tracing::warn;

/// Interpretation of the active-flag cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFlag {
    /// The cell was empty or whitespace.
    Blank,
    /// The cell held `true` or `false` in any letter case.
    Parsed(bool),
    /// The cell held text that is not a boolean.
    Unparsable,
}

impl ActiveFlag {
    /// Classifies the text of an active-flag cell.
    #[must_use]
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if trimmed.eq_ignore_ascii_case("true") {
            Self::Parsed(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Self::Parsed(false)
        } else {
            Self::Unparsable
        }
    }

    /// Resolves the flag to the value stored on the category.
    ///
    /// Blank and unparsable cells both resolve to `true`. A garbled cell
    /// never marks a category inactive.
    #[must_use]
    #[expect(
        clippy::match_same_arms,
        reason = "blank and unparsable cells are distinct cases that share a default"
    )]
    pub const fn parse_or_default_true(self) -> bool {
        match self {
            Self::Parsed(value) => value,
            Self::Blank => true,
            Self::Unparsable => true,
        }
    }
}

/// Converts a raw row into an insert candidate.
///
/// Returns `None` when the trimmed name is blank. Names too long for storage
/// are dropped the same way and logged.
#[must_use]
pub fn candidate_from_row(row: &RawCategoryRow) -> Option<NewCategory> {
    let name = match CategoryName::new(row.name.as_str()) {
        Ok(name) => name,
        Err(CategoryDomainError::EmptyCategoryName) => return None,
        Err(err) => {
            warn!(error = %err, "dropping import row with invalid category name");
            return None;
        }
    };

    let active = ActiveFlag::from_cell(&row.active).parse_or_default_true();
    let mut candidate = NewCategory::new(name).with_active(active);
    let code = row.code.trim();
    if !code.is_empty() {
        candidate = candidate.with_code(code);
    }
    Some(candidate)
}

/// Maps every row to a candidate, silently skipping rows without a name.
#[must_use]
pub fn candidates_from_rows(rows: &[RawCategoryRow]) -> Vec<NewCategory> {
    rows.iter().filter_map(candidate_from_row).collect()
}

/// Keeps the first candidate of every case-folded name, in input order.
#[must_use]
pub fn dedupe_within_batch(candidates: Vec<NewCategory>) -> Vec<NewCategory> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.name().folded()))
        .collect()
}

/// Drops candidates whose case-folded name is already stored.
#[must_use]
pub fn exclude_existing<S: BuildHasher>(
    candidates: Vec<NewCategory>,
    existing_folded_names: &HashSet<String, S>,
) -> Vec<NewCategory> {
    candidates
        .into_iter()
        .filter(|candidate| !existing_folded_names.contains(&candidate.name().folded()))
        .collect()
}
