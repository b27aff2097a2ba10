//! Positional mapping from a decoded worksheet to raw category rows.

/// Zero-based column holding the category name (column A).
pub const NAME_COLUMN: usize = 0;
/// Zero-based column holding the short code (column B).
pub const CODE_COLUMN: usize = 1;
/// Zero-based column holding the active flag (column C).
pub const ACTIVE_COLUMN: usize = 2;

/// Number of leading rows treated as a title row and skipped unread.
pub const HEADER_ROWS: usize = 1;

/// Text grid of the first worksheet of an uploaded document.
///
/// Rows hold cell text in column order. Missing trailing cells read as empty
/// text, so every row is addressable up to any column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    rows: Vec<Vec<String>>,
}

impl Worksheet {
    /// Creates a worksheet from row-major cell text.
    #[must_use]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Returns the number of rows, including the title row.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the text of one cell, or an empty string when the row or
    /// column lies outside the grid.
    #[must_use]
    pub fn cell_text(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

/// One data row of an import, read positionally and left untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCategoryRow {
    /// Column A text.
    pub name: String,
    /// Column B text.
    pub code: String,
    /// Column C text.
    pub active: String,
}

impl RawCategoryRow {
    /// Creates a raw row from its three cells.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>, active: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            active: active.into(),
        }
    }
}

/// Reads every data row of the worksheet.
///
/// The first row is skipped without looking at it. A document without a
/// title row therefore loses its first record; this mirrors how uploads have
/// always been read and is kept deliberately.
#[must_use]
pub fn rows_from_worksheet(sheet: &Worksheet) -> Vec<RawCategoryRow> {
    (HEADER_ROWS..sheet.row_count())
        .map(|row| RawCategoryRow {
            name: sheet.cell_text(row, NAME_COLUMN).to_owned(),
            code: sheet.cell_text(row, CODE_COLUMN).to_owned(),
            active: sheet.cell_text(row, ACTIVE_COLUMN).to_owned(),
        })
        .collect()
}
