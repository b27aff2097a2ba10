//! Category import pipeline: decode, normalize, deduplicate, commit.

use crate::category::{
    domain::import::{
        candidates_from_rows, dedupe_within_batch, exclude_existing, rows_from_worksheet,
    },
    ports::{CategoryRepository, CategoryRepositoryError, TabularDecodeError, TabularDecoder},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

/// Outcome of one import call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    inserted: usize,
}

impl ImportSummary {
    /// Creates a summary for the given number of inserted categories.
    #[must_use]
    pub const fn new(inserted: usize) -> Self {
        Self { inserted }
    }

    /// Returns the number of categories written to storage.
    #[must_use]
    pub const fn inserted(self) -> usize {
        self.inserted
    }
}

/// Errors returned by the category import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The upload carried no bytes.
    #[error("upload is empty")]
    EmptyUpload,

    /// The upload could not be read to the end.
    #[error("failed to read upload: {0}")]
    UploadRead(#[source] std::io::Error),

    /// The upload is not a readable tabular document.
    #[error("malformed document: {0}")]
    MalformedDocument(#[source] TabularDecodeError),

    /// A concurrent writer stored one of the names between the duplicate
    /// check and the insert.
    #[error("import conflicts with stored categories: {0}")]
    Conflict(String),

    /// Category storage failed.
    #[error("category storage unavailable: {0}")]
    StorageUnavailable(#[source] CategoryRepositoryError),
}

impl From<CategoryRepositoryError> for ImportError {
    fn from(err: CategoryRepositoryError) -> Self {
        match err {
            CategoryRepositoryError::DuplicateName(name) => Self::Conflict(name.to_string()),
            CategoryRepositoryError::BatchConflict(detail) => Self::Conflict(detail),
            unavailable @ CategoryRepositoryError::Persistence(_) => {
                Self::StorageUnavailable(unavailable)
            }
        }
    }
}

/// Result type for category import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Orchestrates the spreadsheet import of categories.
#[derive(Clone)]
pub struct CategoryImportService<R, D>
where
    R: CategoryRepository,
    D: TabularDecoder,
{
    repository: Arc<R>,
    decoder: Arc<D>,
}

impl<R, D> CategoryImportService<R, D>
where
    R: CategoryRepository,
    D: TabularDecoder,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(repository: Arc<R>, decoder: Arc<D>) -> Self {
        Self {
            repository,
            decoder,
        }
    }

    /// Buffers an upload stream completely, then imports it.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::UploadRead`] when the stream fails, otherwise
    /// the errors of [`Self::import_document`].
    pub async fn import_stream<U>(&self, mut upload: U) -> ImportResult<ImportSummary>
    where
        U: AsyncRead + Unpin + Send,
    {
        let mut document = Vec::new();
        upload
            .read_to_end(&mut document)
            .await
            .map_err(ImportError::UploadRead)?;
        self.import_document(&document).await
    }

    /// Imports categories from a fully buffered tabular document.
    ///
    /// Rows with a blank name are skipped. Names are deduplicated
    /// case-insensitively, first within the document and then against
    /// stored categories, and the remainder is written in one batch. No
    /// write happens when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::EmptyUpload`] for a zero-length document,
    /// [`ImportError::MalformedDocument`] when it cannot be decoded, and
    /// [`ImportError::Conflict`] or [`ImportError::StorageUnavailable`] when
    /// storage rejects the read or the batch.
    pub async fn import_document(&self, document: &[u8]) -> ImportResult<ImportSummary> {
        if document.is_empty() {
            return Err(ImportError::EmptyUpload);
        }

        let sheet = self
            .decoder
            .first_worksheet(document)
            .map_err(ImportError::MalformedDocument)?;
        let rows = rows_from_worksheet(&sheet);
        let candidates = candidates_from_rows(&rows);
        let candidate_count = candidates.len();
        let unique = dedupe_within_batch(candidates);
        let unique_count = unique.len();

        if unique.is_empty() {
            info!(rows = rows.len(), inserted = 0, "category import found no candidates");
            return Ok(ImportSummary::new(0));
        }

        let existing = self.repository.folded_names().await?;
        let fresh = exclude_existing(unique, &existing);
        debug!(
            rows = rows.len(),
            candidates = candidate_count,
            unique = unique_count,
            fresh = fresh.len(),
            "category import deduplicated"
        );

        if fresh.is_empty() {
            info!(inserted = 0, "category import had nothing new to store");
            return Ok(ImportSummary::new(0));
        }

        let inserted = self.repository.store_batch(&fresh).await?;
        info!(inserted, "category import committed");
        Ok(ImportSummary::new(inserted))
    }
}
