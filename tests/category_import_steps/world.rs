//! Shared world state for category import BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use rust_xlsxwriter::{Workbook, XlsxError};
use taskdeck::category::{
    adapters::{memory::InMemoryCategoryRepository, spreadsheet::SpreadsheetDecoder},
    services::{CategoryCatalogService, CategoryImportService, ImportResult, ImportSummary},
};

/// Import service type used by the BDD world.
pub type TestImportService = CategoryImportService<InMemoryCategoryRepository, SpreadsheetDecoder>;

/// Upload under construction: either workbook rows or raw bytes.
pub enum Upload {
    Rows(Vec<[String; 3]>),
    Raw(Vec<u8>),
}

/// Scenario world for category import behaviour tests.
pub struct ImportWorld {
    pub catalog: CategoryCatalogService<InMemoryCategoryRepository>,
    pub import: TestImportService,
    pub upload: Upload,
    pub last_result: Option<ImportResult<ImportSummary>>,
}

impl ImportWorld {
    /// Creates a world with an empty catalogue and no upload rows.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryCategoryRepository::new());
        Self {
            catalog: CategoryCatalogService::new(Arc::clone(&repository)),
            import: CategoryImportService::new(repository, Arc::new(SpreadsheetDecoder::new())),
            upload: Upload::Rows(Vec::new()),
            last_result: None,
        }
    }

    /// Appends a data row to the pending workbook.
    pub fn push_row(&mut self, name: &str, code: &str, active: &str) {
        let row = [name.to_owned(), code.to_owned(), active.to_owned()];
        match &mut self.upload {
            Upload::Rows(rows) => rows.push(row),
            Upload::Raw(_) => self.upload = Upload::Rows(vec![row]),
        }
    }

    /// Renders the pending upload to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the workbook cannot be written.
    pub fn document(&self) -> Result<Vec<u8>, XlsxError> {
        match &self.upload {
            Upload::Raw(bytes) => Ok(bytes.clone()),
            Upload::Rows(rows) => {
                let mut workbook = Workbook::new();
                let sheet = workbook.add_worksheet();
                for (column, title) in (0_u16..).zip(["Name", "Code", "Active"]) {
                    sheet.write_string(0, column, title)?;
                }
                for (row, cells) in (1_u32..).zip(rows) {
                    for (column, text) in (0_u16..).zip(cells) {
                        if !text.is_empty() {
                            sheet.write_string(row, column, text)?;
                        }
                    }
                }
                workbook.save_to_buffer()
            }
        }
    }
}

impl Default for ImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ImportWorld {
    ImportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
