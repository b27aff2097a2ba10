//! Spreadsheet decoder backed by `calamine`.
//!
//! Accepts any workbook format `calamine` can detect (xlsx, xlsm, xlsb, xls
//! and ods). Only the first worksheet is read.

use crate::category::{
    domain::import::Worksheet,
    ports::{TabularDecodeError, TabularDecoder},
};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Workbook decoder for uploaded category sheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl SpreadsheetDecoder {
    /// Creates a decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TabularDecoder for SpreadsheetDecoder {
    fn first_worksheet(&self, document: &[u8]) -> Result<Worksheet, TabularDecodeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(document.to_vec()))
            .map_err(|err| TabularDecodeError::Unreadable(err.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(TabularDecodeError::NoWorksheet)?
            .map_err(|err| TabularDecodeError::Unreadable(err.to_string()))?;
        Ok(worksheet_from_range(&range))
    }
}

/// Converts a used cell range into a text grid addressed from column A.
///
/// Rows without any text are left out, so the first row of the grid is the
/// first row that holds data.
fn worksheet_from_range(range: &Range<Data>) -> Worksheet {
    let leading_columns = range
        .start()
        .and_then(|(_, column)| usize::try_from(column).ok())
        .unwrap_or_default();

    let rows = range
        .rows()
        .map(|cells| {
            let mut row = vec![String::new(); leading_columns];
            row.extend(cells.iter().map(cell_text));
            row
        })
        .filter(|row| row.iter().any(|text| !text.trim().is_empty()))
        .collect();
    Worksheet::new(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
