//! Decoder port for tabular upload documents.

use crate::category::domain::import::Worksheet;
use thiserror::Error;

/// Decodes an uploaded document into cell text.
///
/// Implementations only need to expose the first worksheet; the import reads
/// nothing else.
pub trait TabularDecoder: Send + Sync {
    /// Decodes the first worksheet of a fully buffered document.
    ///
    /// # Errors
    ///
    /// Returns [`TabularDecodeError`] when the bytes are not a readable
    /// tabular document or contain no worksheet.
    fn first_worksheet(&self, document: &[u8]) -> Result<Worksheet, TabularDecodeError>;
}

/// Errors returned by tabular decoders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TabularDecodeError {
    /// The bytes could not be opened as a tabular document.
    #[error("unreadable tabular document: {0}")]
    Unreadable(String),

    /// The document opened but holds no worksheet.
    #[error("tabular document contains no worksheet")]
    NoWorksheet,
}
